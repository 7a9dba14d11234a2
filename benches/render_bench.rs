use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arttext::{layout, render, BackgroundMode, BuiltinFont, RenderConfig};

const TEXT: &str = "The quick brown fox jumps over the lazy dog.\n\
                    Pack my box with five dozen liquor jugs.\n\
                    How vexingly quick daft zebras jump!";

fn bench_layout(c: &mut Criterion) {
    let cfg = RenderConfig::default();
    c.bench_function("layout_paragraph", |b| {
        b.iter(|| layout(black_box(TEXT), &cfg, &BuiltinFont).unwrap())
    });
}

fn bench_render(c: &mut Criterion) {
    let cfg = RenderConfig { background: BackgroundMode::Dark, font_size: 48.0, ..Default::default() };
    c.bench_function("render_paragraph", |b| {
        b.iter(|| render(black_box(TEXT), &cfg, &BuiltinFont).unwrap())
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
