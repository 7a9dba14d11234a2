/// Compositing of a layout into a bitmap

use crate::color::ColorSpec;
use crate::rendering::font::GlyphRasterizer;
use crate::rendering::layout::LayoutResult;
use crate::rendering::paint::{build_display_list, PaintCommand};
use crate::rendering::Bitmap;
use crate::{Error, Result};

/// Rasterize `layout` onto a `canvas_width x ceil(content_height)` bitmap.
///
/// Both dimensions are at least one pixel. The background fill is painted
/// before any glyph, so every pixel ends up opaque.
pub fn rasterize<G>(
    layout: &LayoutResult,
    background: ColorSpec,
    canvas_width: u32,
    glyphs: &G,
) -> Result<Bitmap>
where
    G: GlyphRasterizer + ?Sized,
{
    let width = canvas_width.max(1);
    let height = (layout.content_height.ceil() as u32).max(1);
    let mut bitmap = Bitmap::allocate(width, height)?;

    let commands = build_display_list(layout, background, width, height);
    let mut glyph_index = 0usize;
    for command in &commands {
        match command {
            PaintCommand::SolidRect { x, y, width, height, rgba } => {
                bitmap.fill_rect(*x, *y, *width, *height, *rgba);
            }
            PaintCommand::Glyph { character, x, y, size, rgba } => {
                let mask = glyphs
                    .glyph_mask(*character, *size)
                    .map_err(|source| Error::Rasterize { character: *character, glyph: glyph_index, source })?;
                let ox = *x as i64 + mask.left as i64;
                let oy = *y as i64 + mask.top as i64;
                for my in 0..mask.height {
                    for mx in 0..mask.width {
                        let coverage = mask.coverage_at(mx, my);
                        bitmap.blend_pixel(ox + mx as i64, oy + my as i64, *rgba, coverage);
                    }
                }
                glyph_index += 1;
            }
        }
    }

    log::debug!(
        "rasterized {} glyphs onto {}x{} canvas",
        glyph_index,
        bitmap.width(),
        bitmap.height()
    );
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::font::{BuiltinFont, GlyphMask, GlyphSize, MeasureError, TextMeasure};
    use crate::rendering::layout::{layout, GlyphRecord};
    use crate::{BackgroundMode, RenderConfig};

    #[test]
    fn empty_layout_gives_one_row_of_background() {
        let bg = BackgroundMode::Dark.color();
        let b = rasterize(&LayoutResult::empty(), bg, 10, &BuiltinFont).unwrap();
        assert_eq!((b.width(), b.height()), (10, 1));
        assert!(b.as_raw().chunks(4).all(|p| p == [34, 34, 34, 255]));
    }

    #[test]
    fn zero_width_canvas_is_clamped() {
        let b = rasterize(&LayoutResult::empty(), ColorSpec::from_rgb8([0, 0, 0]), 0, &BuiltinFont).unwrap();
        assert_eq!((b.width(), b.height()), (1, 1));
    }

    #[test]
    fn every_pixel_is_opaque_after_glyphs() {
        let cfg = RenderConfig { canvas_width: 120, ..Default::default() };
        let out = layout("Hello,\nworld", &cfg, &BuiltinFont).unwrap();
        let b = rasterize(&out, cfg.background.color(), cfg.canvas_width, &BuiltinFont).unwrap();
        assert_eq!(b.height(), out.content_height.ceil() as u32);
        assert!(b.as_raw().chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn glyph_pixels_take_record_color() {
        // '|' at size 8 lights column 2, rows 0..7, of its cell.
        let color = ColorSpec::from_rgb8([200, 10, 10]);
        let layout = LayoutResult {
            glyphs: vec![GlyphRecord { character: '|', x: 4.0, y: 2.0, width: 6.0, height: 8.0, color }],
            content_width: 16.0,
            content_height: 12.0,
            line_count: 1,
        };
        let b = rasterize(&layout, BackgroundMode::Light.color(), 16, &BuiltinFont).unwrap();
        assert_eq!(b.pixel(6, 2), [200, 10, 10, 255]);
        assert_eq!(b.pixel(6, 8), [200, 10, 10, 255]);
        assert_eq!(b.pixel(6, 9), [255, 255, 255, 255]);
        assert_eq!(b.pixel(5, 4), [255, 255, 255, 255]);
    }

    #[test]
    fn glyph_past_edge_is_clipped() {
        let layout = LayoutResult {
            glyphs: vec![GlyphRecord {
                character: 'W',
                x: 14.0,
                y: 0.0,
                width: 12.0,
                height: 16.0,
                color: ColorSpec::from_rgb8([0, 0, 0]),
            }],
            content_width: 16.0,
            content_height: 16.0,
            line_count: 1,
        };
        let b = rasterize(&layout, BackgroundMode::Light.color(), 16, &BuiltinFont).unwrap();
        assert_eq!(b.width(), 16);
    }

    #[test]
    fn missing_glyph_fails_rasterization() {
        let layout = LayoutResult {
            glyphs: vec![GlyphRecord {
                character: '\u{0}',
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 12.0,
                color: ColorSpec::from_rgb8([0, 0, 0]),
            }],
            content_width: 4.0,
            content_height: 12.0,
            line_count: 1,
        };
        let err = rasterize(&layout, BackgroundMode::Light.color(), 4, &BuiltinFont).unwrap_err();
        assert!(matches!(err, Error::Rasterize { character: '\u{0}', glyph: 0, .. }));
    }

    #[test]
    fn mask_failure_reports_glyph_ordinal_not_text_position() {
        // Measures everything but cannot draw 'z'. The line break is text
        // position 2 but produces no glyph, so 'z' is glyph 2 at position 3.
        struct NoZ;
        impl TextMeasure for NoZ {
            fn measure(&self, ch: char, size: f32) -> std::result::Result<GlyphSize, MeasureError> {
                BuiltinFont.measure(ch, size)
            }
        }
        impl GlyphRasterizer for NoZ {
            fn glyph_mask(&self, ch: char, size: f32) -> std::result::Result<GlyphMask, MeasureError> {
                if ch == 'z' {
                    return Err(MeasureError::MissingGlyph(ch));
                }
                BuiltinFont.glyph_mask(ch, size)
            }
        }

        let cfg = RenderConfig::default();
        let out = layout("ab\nz", &cfg, &NoZ).unwrap();
        let err = rasterize(&out, cfg.background.color(), cfg.canvas_width, &NoZ).unwrap_err();
        assert!(matches!(err, Error::Rasterize { character: 'z', glyph: 2, .. }), "{:?}", err);
    }
}
