//! Arttext
//!
//! Renders text as a grid of individually colored characters. Each character
//! gets a deterministic color derived from its MD5 digest and nudged until it
//! is legible on the chosen background; glyphs are wrapped greedily onto a
//! fixed-width canvas and composited into an RGBA bitmap ready for PNG export.
//!
//! The pipeline is pure: every call to [`render`] starts from scratch.
//!
//! # Example
//!
//! ```
//! use arttext::{render, BackgroundMode, BuiltinFont, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig {
//!     background: BackgroundMode::Dark,
//!     canvas_width: 320,
//!     ..Default::default()
//! };
//!
//! let rendering = render("Hello\nworld", &config, &BuiltinFont)?;
//! assert_eq!(rendering.layout.glyphs.len(), 10);
//! let png = rendering.bitmap.encode_png()?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod color;
pub mod error;
pub mod export;
pub mod rendering;

pub use color::{derive_color, ColorSpec};
pub use error::{Error, Result};
pub use export::{export_rendering, Exporter, PngFileExporter};
pub use rendering::font::{BuiltinFont, GlyphRasterizer, TextMeasure};
pub use rendering::layout::{layout, GlyphRecord, LayoutResult};
pub use rendering::raster::rasterize;
pub use rendering::Bitmap;

#[cfg(feature = "truetype")]
pub use rendering::truetype::TrueTypeFont;

/// Smallest font size the slider can produce
pub const MIN_FONT_SIZE: f32 = 12.0;
/// Largest font size the slider can produce
pub const MAX_FONT_SIZE: f32 = 72.0;

/// Background the text is rendered against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// White canvas, glyphs pushed dark
    #[default]
    Light,
    /// `#222222` canvas, glyphs pushed bright
    Dark,
}

impl BackgroundMode {
    pub fn rgb8(self) -> [u8; 3] {
        match self {
            BackgroundMode::Light => [0xff, 0xff, 0xff],
            BackgroundMode::Dark => [0x22, 0x22, 0x22],
        }
    }

    pub fn color(self) -> ColorSpec {
        ColorSpec::from_rgb8(self.rgb8())
    }
}

/// Configuration for one render pass
///
/// Built fresh per request and never mutated by the pipeline. Defaults match
/// the interactive tool: 24px text, 20px padding and 10px between lines on a
/// 580px wide white canvas.
///
/// # Examples
///
/// ```
/// let cfg = arttext::RenderConfig::default();
/// assert_eq!(cfg.padding, 20.0);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Glyph height in pixels, 12 to 72
    pub font_size: f32,
    /// Inset on every side of the canvas
    pub padding: f32,
    /// Extra gap between lines
    pub line_spacing: f32,
    /// Canvas width in pixels; content only grows vertically
    pub canvas_width: u32,
    /// Background fill and contrast target
    pub background: BackgroundMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            padding: 20.0,
            line_spacing: 10.0,
            canvas_width: 580,
            background: BackgroundMode::Light,
        }
    }
}

impl RenderConfig {
    /// Map a normalized slider position to a font size (`12 + v * 60`).
    /// Values outside `[0, 1]` are clamped.
    pub fn font_size_from_slider(v: f32) -> f32 {
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        MIN_FONT_SIZE + v * (MAX_FONT_SIZE - MIN_FONT_SIZE)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(Error::ConfigError(format!(
                "font size {} outside {}..={}",
                self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(Error::ConfigError(format!("padding {} must be >= 0", self.padding)));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing >= 0.0) {
            return Err(Error::ConfigError(format!(
                "line spacing {} must be >= 0",
                self.line_spacing
            )));
        }
        if self.canvas_width == 0 {
            return Err(Error::ConfigError("canvas width must be > 0".into()));
        }
        Ok(())
    }
}

/// Layout and bitmap from one pass
#[derive(Debug, Clone)]
pub struct Rendering {
    pub layout: LayoutResult,
    pub bitmap: Bitmap,
}

/// Run the whole pipeline: layout (coloring every glyph), then rasterize.
pub fn render<G>(text: &str, config: &RenderConfig, glyphs: &G) -> Result<Rendering>
where
    G: GlyphRasterizer + ?Sized,
{
    let layout = layout(text, config, glyphs)?;
    let bitmap = rasterize(&layout, config.background.color(), config.canvas_width, glyphs)?;
    log::debug!(
        "rendered {} chars as {} glyphs on {} lines ({}x{})",
        text.chars().count(),
        layout.glyphs.len(),
        layout.line_count,
        bitmap.width(),
        bitmap.height()
    );
    Ok(Rendering { layout, bitmap })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.font_size, 24.0);
        assert_eq!(config.line_spacing, 10.0);
        assert_eq!(config.canvas_width, 580);
        assert_eq!(config.background, BackgroundMode::Light);
    }

    #[test]
    fn slider_maps_to_font_range() {
        assert_eq!(RenderConfig::font_size_from_slider(0.0), 12.0);
        assert_eq!(RenderConfig::font_size_from_slider(1.0), 72.0);
        assert_eq!(RenderConfig::font_size_from_slider(0.5), 42.0);
        assert_eq!(RenderConfig::font_size_from_slider(-3.0), 12.0);
        assert_eq!(RenderConfig::font_size_from_slider(f32::NAN), 12.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            RenderConfig { font_size: 11.9, ..Default::default() },
            RenderConfig { padding: -1.0, ..Default::default() },
            RenderConfig { line_spacing: f32::INFINITY, ..Default::default() },
            RenderConfig { canvas_width: 0, ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(Error::ConfigError(_))), "{:?}", cfg);
        }
    }

    #[test]
    fn config_reads_partial_json() {
        let cfg: RenderConfig =
            serde_json::from_str(r#"{"fontSize": 36, "background": "dark"}"#).unwrap();
        assert_eq!(cfg.font_size, 36.0);
        assert_eq!(cfg.background, BackgroundMode::Dark);
        assert_eq!(cfg.padding, 20.0);
    }

    #[test]
    fn background_colors() {
        assert_eq!(BackgroundMode::Dark.color().to_rgba8(), [34, 34, 34, 255]);
        assert_eq!(BackgroundMode::Light.color().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn render_empty_text_is_not_an_error() {
        let r = render("", &RenderConfig::default(), &BuiltinFont).unwrap();
        assert!(r.layout.glyphs.is_empty());
        assert_eq!((r.bitmap.width(), r.bitmap.height()), (580, 1));
    }
}
