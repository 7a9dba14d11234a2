use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use arttext::{export_rendering, render, BackgroundMode, Error, GlyphRasterizer, PngFileExporter, RenderConfig};

/// Render text as individually colored characters and save it as a PNG.
#[derive(Parser, Debug)]
#[command(name = "arttext", version, about)]
struct Cli {
    /// Text to render; read from stdin when omitted
    text: Option<String>,

    /// Font size slider position in [0, 1] (12 + v * 60)
    #[arg(long, conflicts_with = "font_size")]
    slider: Option<f32>,

    /// Font size in pixels (12 to 72)
    #[arg(long)]
    font_size: Option<f32>,

    /// Background to render against
    #[arg(long, value_enum)]
    background: Option<BackgroundMode>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Padding around the text
    #[arg(long)]
    padding: Option<f32>,

    /// Extra space between lines
    #[arg(long)]
    line_spacing: Option<f32>,

    /// JSON file with default settings (camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the PNG is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the layout as JSON instead of saving an image
    #[arg(long)]
    layout_json: bool,

    /// Print the SHA-256 digest of the rendered bitmap
    #[arg(long)]
    digest: bool,

    /// TrueType/OpenType font file to use instead of the built-in face
    #[cfg(feature = "truetype")]
    #[arg(long)]
    font: Option<PathBuf>,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };
        if let Some(v) = self.slider {
            cfg.font_size = RenderConfig::font_size_from_slider(v);
        }
        if let Some(size) = self.font_size {
            cfg.font_size = size;
        }
        if let Some(bg) = self.background {
            cfg.background = bg;
        }
        if let Some(w) = self.width {
            cfg.canvas_width = w;
        }
        if let Some(p) = self.padding {
            cfg.padding = p;
        }
        if let Some(s) = self.line_spacing {
            cfg.line_spacing = s;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn glyph_source(&self) -> Result<Box<dyn GlyphRasterizer>> {
        #[cfg(feature = "truetype")]
        if let Some(path) = &self.font {
            return Ok(Box::new(arttext::TrueTypeFont::from_path(path)?));
        }
        Ok(Box::new(arttext::BuiltinFont::new()))
    }

    fn text(&self) -> Result<String> {
        match &self.text {
            Some(t) => Ok(t.clone()),
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("reading text from stdin")?;
                Ok(trim_line_ending(buf))
            }
        }
    }
}

/// Drop the one line ending a shell pipe appends, LF or CRLF.
fn trim_line_ending(mut text: String) -> String {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') {
        text.pop();
    }
    text
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.render_config()?;
    let glyphs = cli.glyph_source()?;
    let text = cli.text()?;

    let rendering = render(&text, &config, glyphs.as_ref())?;

    if cli.layout_json {
        println!("{}", serde_json::to_string_pretty(&rendering.layout)?);
    }
    if cli.digest {
        println!("{}", rendering.bitmap.digest());
    }
    if cli.layout_json || cli.digest {
        return Ok(());
    }

    let exporter = PngFileExporter::new(&cli.out_dir);
    let path = export_rendering(&text, &rendering, &exporter)?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if matches!(e.downcast_ref::<Error>(), Some(Error::EmptyText)) {
            eprintln!("No text entered");
        } else {
            eprintln!("arttext: {:#}", e);
        }
        std::process::exit(1);
    }
}
