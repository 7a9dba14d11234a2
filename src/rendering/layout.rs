/// Greedy per-character line wrapping

use serde::Serialize;

use crate::color::{derive_color, ColorSpec};
use crate::rendering::font::TextMeasure;
use crate::{Error, RenderConfig, Result};

/// One positioned, colored character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphRecord {
    pub character: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: ColorSpec,
}

impl GlyphRecord {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub glyphs: Vec<GlyphRecord>,
    pub content_width: f32,
    pub content_height: f32,
    /// Lines opened by the pass, including blank ones from consecutive breaks
    pub line_count: usize,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self { glyphs: Vec::new(), content_width: 0.0, content_height: 0.0, line_count: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.line_count == 0
    }
}

/// Lay `text` out on a canvas of `config.canvas_width`.
///
/// - The cursor starts at `(padding, padding)`
/// - `\n`, `\r\n` and a lone `\r` each start a new line and emit no glyph
/// - A glyph that would cross `canvas_width - padding` wraps first, unless it
///   is the first glyph on its line
/// - Content grows downwards only; the width is always the canvas width
pub fn layout<M>(text: &str, config: &RenderConfig, measure: &M) -> Result<LayoutResult>
where
    M: TextMeasure + ?Sized,
{
    config.validate()?;
    if text.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let line_advance = config.font_size + config.line_spacing;
    let right_edge = config.canvas_width as f32 - config.padding;

    let mut x = config.padding;
    let mut y = config.padding;
    let mut glyphs_on_line = 0usize;
    let mut line_count = 1usize;
    let mut glyphs = Vec::with_capacity(text.len());

    let mut chars = text.chars().enumerate().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch == '\r' || ch == '\n' {
            if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                chars.next();
            }
            x = config.padding;
            y += line_advance;
            glyphs_on_line = 0;
            line_count += 1;
            continue;
        }

        let size = measure
            .measure(ch, config.font_size)
            .map_err(|source| Error::Measure { character: ch, index, source })?;
        let width = size.width.max(0.0);

        if x + width > right_edge && glyphs_on_line > 0 {
            log::trace!("wrapping before {:?} at x={} (edge {})", ch, x, right_edge);
            x = config.padding;
            y += line_advance;
            glyphs_on_line = 0;
            line_count += 1;
        }

        glyphs.push(GlyphRecord {
            character: ch,
            x,
            y,
            width,
            height: config.font_size,
            color: derive_color(ch, config.background),
        });
        x += width;
        glyphs_on_line += 1;
    }

    Ok(LayoutResult {
        glyphs,
        content_width: config.canvas_width as f32,
        content_height: y + config.font_size + config.padding,
        line_count,
    })
}
