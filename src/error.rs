//! Error types for the rendering pipeline

use thiserror::Error;

use crate::rendering::font::MeasureError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while laying out, rasterizing or exporting text
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The measurement collaborator could not size a character
    #[error("Failed to measure {character:?} at position {index}: {source}")]
    Measure {
        character: char,
        index: usize,
        #[source]
        source: MeasureError,
    },

    /// The glyph source could not produce a coverage mask; `glyph` counts
    /// laid-out glyphs, not characters of the input
    #[error("Failed to rasterize {character:?} (glyph {glyph}): {source}")]
    Rasterize {
        character: char,
        glyph: usize,
        #[source]
        source: MeasureError,
    },

    /// The bitmap for the requested canvas could not be allocated
    #[error("Canvas of {width}x{height} pixels is too large to allocate")]
    ResourceExhausted { width: u32, height: u32 },

    /// Export was requested for an empty text
    #[error("No text entered; nothing to export")]
    EmptyText,

    /// A font file could not be loaded
    #[error("Font error: {0}")]
    FontError(String),

    /// PNG encoding failed
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// I/O failure while exporting
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
