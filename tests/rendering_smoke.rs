use arttext::{render, BackgroundMode, BuiltinFont, RenderConfig};

#[test]
fn smoke_render_light_and_dark() {
    for background in [BackgroundMode::Light, BackgroundMode::Dark] {
        let cfg = RenderConfig { background, canvas_width: 256, ..Default::default() };
        let r = render("Hello, colors!", &cfg, &BuiltinFont).expect("render");
        assert_eq!(r.bitmap.width(), 256);
        assert_eq!(r.bitmap.height(), r.layout.content_height.ceil() as u32);
        // top-left corner lies in the padding, so it keeps the background
        let [red, green, blue] = background.rgb8();
        assert_eq!(r.bitmap.pixel(0, 0), [red, green, blue, 255]);
    }
}

#[test]
fn scenario_two_lines_with_explicit_break() {
    let cfg = RenderConfig { canvas_width: 100, font_size: 20.0, padding: 20.0, ..Default::default() };
    let r = render("AB\nC", &cfg, &BuiltinFont).expect("render");
    let placed: Vec<_> = r.layout.glyphs.iter().map(|g| (g.character, g.y)).collect();
    assert_eq!(placed, vec![('A', 20.0), ('B', 20.0), ('C', 50.0)]);
    assert_eq!(r.layout.content_height, 90.0);
    assert_eq!(r.bitmap.height(), 90);
}

#[test]
fn rerunning_pipeline_is_byte_identical() {
    let cfg = RenderConfig { background: BackgroundMode::Dark, ..Default::default() };
    let text = "The quick brown fox jumps over the lazy dog.\n色とりどりの文字";
    let a = render(text, &cfg, &BuiltinFont).expect("first render");
    let b = render(text, &cfg, &BuiltinFont).expect("second render");
    assert_eq!(a.bitmap.as_raw(), b.bitmap.as_raw());
    assert_eq!(a.bitmap.digest(), b.bitmap.digest());
    assert_eq!(a.bitmap.encode_png().unwrap(), b.bitmap.encode_png().unwrap());
}

#[test]
fn glyph_colors_reach_the_bitmap() {
    // 'A' on light resolves to (77, 167, 28); its crossbar row is fully lit.
    let cfg = RenderConfig { canvas_width: 100, font_size: 16.0, padding: 20.0, ..Default::default() };
    let r = render("A", &cfg, &BuiltinFont).expect("render");
    let found = r.bitmap.as_raw().chunks(4).any(|p| p == [77, 167, 28, 255]);
    assert!(found, "expected pixels in the glyph color");
}
