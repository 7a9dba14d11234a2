//! TrueType/OpenType glyph source backed by `fontdue`

use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::rendering::font::{GlyphMask, GlyphRasterizer, GlyphSize, MeasureError, TextMeasure};
use crate::{Error, Result};

/// A parsed outline font.
pub struct TrueTypeFont {
    font: Font,
}

impl TrueTypeFont {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::FontError(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::FontError(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded font {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    fn glyph_for(&self, ch: char, font_size: f32) -> std::result::Result<(), MeasureError> {
        if !(font_size.is_finite() && font_size > 0.0) {
            return Err(MeasureError::InvalidSize(font_size.to_string()));
        }
        if ch.is_control() || self.font.lookup_glyph_index(ch) == 0 {
            return Err(MeasureError::MissingGlyph(ch));
        }
        Ok(())
    }

    fn ascent(&self, font_size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size * 0.8)
    }
}

impl TextMeasure for TrueTypeFont {
    fn measure(&self, ch: char, font_size: f32) -> std::result::Result<GlyphSize, MeasureError> {
        self.glyph_for(ch, font_size)?;
        let metrics = self.font.metrics(ch, font_size);
        Ok(GlyphSize { width: metrics.advance_width, height: font_size })
    }
}

impl GlyphRasterizer for TrueTypeFont {
    fn glyph_mask(&self, ch: char, font_size: f32) -> std::result::Result<GlyphMask, MeasureError> {
        self.glyph_for(ch, font_size)?;
        let (metrics, coverage) = self.font.rasterize(ch, font_size);
        if metrics.width == 0 || metrics.height == 0 {
            return Ok(GlyphMask::empty());
        }
        // ymin is the bottom edge relative to the baseline, positive upwards.
        let top = self.ascent(font_size) - (metrics.ymin as f32 + metrics.height as f32);
        Ok(GlyphMask {
            left: metrics.xmin,
            top: top.round() as i32,
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
        })
    }
}
