/// Display list between layout and rasterization

use crate::color::ColorSpec;
use crate::rendering::layout::LayoutResult;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: [u8; 4],
    },
    Glyph {
        character: char,
        x: i32,
        y: i32,
        size: f32,
        rgba: [u8; 4],
    },
}

/// Build the paint order for a layout: the whole-canvas background fill
/// always comes first, then one glyph per record in text order.
pub fn build_display_list(
    layout: &LayoutResult,
    background: ColorSpec,
    width: u32,
    height: u32,
) -> Vec<PaintCommand> {
    let mut commands = Vec::with_capacity(layout.glyphs.len() + 1);
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width,
        height,
        rgba: background.to_rgba8(),
    });
    commands.extend(layout.glyphs.iter().map(|g| PaintCommand::Glyph {
        character: g.character,
        x: g.x.round() as i32,
        y: g.y.round() as i32,
        size: g.height,
        rgba: g.color.to_rgba8(),
    }));
    commands
}
