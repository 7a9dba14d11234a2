//! Glyph sources: measurement and coverage masks.
//!
//! Layout only needs [`TextMeasure`]; the rasterizer needs the coverage masks
//! from [`GlyphRasterizer`]. [`BuiltinFont`] is an embedded 5x7 face that
//! works without any font file.

use thiserror::Error;

/// Why a glyph could not be measured or rasterized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The face has no glyph for this character
    #[error("no glyph for {0:?} in font")]
    MissingGlyph(char),

    /// The requested size cannot be rendered
    #[error("unsupported font size {0}")]
    InvalidSize(String),
}

/// Measured box of one glyph in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSize {
    pub width: f32,
    pub height: f32,
}

/// 8-bit coverage grid for one glyph.
///
/// `left`/`top` offset the grid from the top-left corner of the glyph box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn empty() -> Self {
        Self { left: 0, top: 0, width: 0, height: 0, coverage: Vec::new() }
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Measurement collaborator used by layout.
pub trait TextMeasure {
    fn measure(&self, ch: char, font_size: f32) -> Result<GlyphSize, MeasureError>;
}

impl<F> TextMeasure for F
where
    F: Fn(char, f32) -> Result<GlyphSize, MeasureError>,
{
    fn measure(&self, ch: char, font_size: f32) -> Result<GlyphSize, MeasureError> {
        self(ch, font_size)
    }
}

/// A glyph source that can also produce coverage masks for the rasterizer.
pub trait GlyphRasterizer: TextMeasure {
    fn glyph_mask(&self, ch: char, font_size: f32) -> Result<GlyphMask, MeasureError>;
}

/// Columns of the embedded face, excluding the one-column gap.
const GLYPH_COLS: u32 = 5;
/// Rows of the embedded face, excluding the descender row.
const GLYPH_ROWS: u32 = 7;
/// The glyph cell is 6x8 units; one unit is `font_size / CELL_ROWS` pixels.
const CELL_COLS: f32 = 6.0;
const CELL_ROWS: f32 = 8.0;

/// Embedded 5x7 face for printable ASCII.
///
/// Printable characters outside ASCII are drawn as an outlined full-width box.
/// Control characters have no glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    pub fn new() -> Self {
        BuiltinFont
    }

    fn check_size(font_size: f32) -> Result<(), MeasureError> {
        if font_size.is_finite() && font_size > 0.0 {
            Ok(())
        } else {
            Err(MeasureError::InvalidSize(font_size.to_string()))
        }
    }
}

impl TextMeasure for BuiltinFont {
    fn measure(&self, ch: char, font_size: f32) -> Result<GlyphSize, MeasureError> {
        Self::check_size(font_size)?;
        if ch.is_control() {
            return Err(MeasureError::MissingGlyph(ch));
        }
        let width = if ascii_columns(ch).is_some() {
            font_size * CELL_COLS / CELL_ROWS
        } else {
            font_size
        };
        Ok(GlyphSize { width, height: font_size })
    }
}

impl GlyphRasterizer for BuiltinFont {
    fn glyph_mask(&self, ch: char, font_size: f32) -> Result<GlyphMask, MeasureError> {
        let size = self.measure(ch, font_size)?;
        let width = size.width.ceil() as u32;
        let height = size.height.ceil() as u32;
        if width == 0 || height == 0 {
            return Ok(GlyphMask::empty());
        }

        let mut coverage = vec![0u8; (width * height) as usize];
        match ascii_columns(ch) {
            Some(columns) => {
                let unit = font_size / CELL_ROWS;
                for py in 0..height {
                    let row = (py as f32 / unit) as u32;
                    if row >= GLYPH_ROWS {
                        continue;
                    }
                    for px in 0..width {
                        let col = (px as f32 / unit) as u32;
                        if col < GLYPH_COLS && columns[col as usize] & (1 << row) != 0 {
                            coverage[(py * width + px) as usize] = 255;
                        }
                    }
                }
            }
            None => {
                let stroke = ((font_size / 12.0).round() as u32).max(1);
                let inset = stroke;
                for py in inset..height.saturating_sub(inset) {
                    for px in inset..width.saturating_sub(inset) {
                        let edge = px < inset + stroke
                            || py < inset + stroke
                            || px + stroke + inset >= width
                            || py + stroke + inset >= height;
                        if edge {
                            coverage[(py * width + px) as usize] = 255;
                        }
                    }
                }
            }
        }

        Ok(GlyphMask { left: 0, top: 0, width, height, coverage })
    }
}

fn ascii_columns(ch: char) -> Option<&'static [u8; 5]> {
    let code = ch as u32;
    if (0x20..=0x7e).contains(&code) {
        Some(&FONT_5X7[(code - 0x20) as usize])
    } else {
        None
    }
}

// Column-major, least significant bit is the top row.
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // #
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1c, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1c, 0x00], // )
    [0x14, 0x08, 0x3e, 0x08, 0x14], // *
    [0x08, 0x08, 0x3e, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // 0
    [0x00, 0x42, 0x7f, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4b, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7f, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1e], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3e], // @
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // A
    [0x7f, 0x49, 0x49, 0x49, 0x36], // B
    [0x3e, 0x41, 0x41, 0x41, 0x22], // C
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // D
    [0x7f, 0x49, 0x49, 0x49, 0x41], // E
    [0x7f, 0x09, 0x09, 0x09, 0x01], // F
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // G
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // H
    [0x00, 0x41, 0x7f, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3f, 0x01], // J
    [0x7f, 0x08, 0x14, 0x22, 0x41], // K
    [0x7f, 0x40, 0x40, 0x40, 0x40], // L
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // M
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // N
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // O
    [0x7f, 0x09, 0x09, 0x09, 0x06], // P
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // Q
    [0x7f, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7f, 0x01, 0x01], // T
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // U
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // V
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7f, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7f, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7f], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7e, 0x09, 0x01, 0x02], // f
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // g
    [0x7f, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7d, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3d, 0x00], // j
    [0x7f, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7f, 0x40, 0x00], // l
    [0x7c, 0x04, 0x18, 0x04, 0x78], // m
    [0x7c, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7c, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7c], // q
    [0x7c, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3f, 0x44, 0x40, 0x20], // t
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // u
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // v
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // y
    [0x44, 0x64, 0x54, 0x4c, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7f, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];
