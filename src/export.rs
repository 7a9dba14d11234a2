//! Export collaborator: persisting a rendered bitmap
//!
//! The pipeline itself never touches storage. An [`Exporter`] receives the
//! finished bitmap; [`PngFileExporter`] writes timestamped PNG files the same
//! way the interactive tool names its saved images.

use std::fs;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use crate::rendering::Bitmap;
use crate::{Error, Rendering, Result};

/// Durable storage for rendered bitmaps
pub trait Exporter {
    /// Store `bitmap` and return where it ended up
    fn export(&self, bitmap: &Bitmap) -> Result<PathBuf>;
}

/// Writes `art_text_<YYYY-MM-DD_HH-MM-SS>.png` into a directory
#[derive(Debug, Clone)]
pub struct PngFileExporter {
    dir: PathBuf,
}

impl PngFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an export made at `at` (UTC).
    pub fn file_name(at: OffsetDateTime) -> Result<String> {
        let fmt = format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
        let stamp = at
            .format(fmt)
            .map_err(|e| Error::EncodeError(format!("timestamp: {}", e)))?;
        Ok(format!("art_text_{}.png", stamp))
    }

    // Two exports within the same second get `_1`, `_2`, ... suffixes.
    fn unique_path(&self, name: &str) -> PathBuf {
        let first = self.dir.join(name);
        if !first.exists() {
            return first;
        }
        let stem = name.trim_end_matches(".png");
        (1u32..)
            .map(|n| self.dir.join(format!("{}_{}.png", stem, n)))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

impl Exporter for PngFileExporter {
    fn export(&self, bitmap: &Bitmap) -> Result<PathBuf> {
        let png = bitmap.encode_png()?;
        fs::create_dir_all(&self.dir)?;
        let path = self.unique_path(&Self::file_name(OffsetDateTime::now_utc())?);
        fs::write(&path, &png)?;
        log::info!("saved {} ({} bytes)", path.display(), png.len());
        Ok(path)
    }
}

/// Hand a rendering to `exporter`, refusing when there was no text.
pub fn export_rendering<E>(text: &str, rendering: &Rendering, exporter: &E) -> Result<PathBuf>
where
    E: Exporter + ?Sized,
{
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    exporter.export(&rendering.bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use time::macros::datetime;

    struct CountingExporter {
        calls: Cell<usize>,
    }

    impl Exporter for CountingExporter {
        fn export(&self, _bitmap: &Bitmap) -> Result<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            Ok(PathBuf::from("memory"))
        }
    }

    #[test]
    fn file_name_uses_timestamp() {
        let name = PngFileExporter::file_name(datetime!(2024-03-05 7:08:09 UTC)).unwrap();
        assert_eq!(name, "art_text_2024-03-05_07-08-09.png");
    }

    #[test]
    fn empty_text_is_refused_before_export() {
        let rendering = crate::render("", &crate::RenderConfig::default(), &crate::BuiltinFont).unwrap();
        let exporter = CountingExporter { calls: Cell::new(0) };
        let err = export_rendering("", &rendering, &exporter).unwrap_err();
        assert!(matches!(err, Error::EmptyText));
        assert_eq!(exporter.calls.get(), 0);
    }

    #[test]
    fn non_empty_text_reaches_exporter() {
        let rendering = crate::render("x", &crate::RenderConfig::default(), &crate::BuiltinFont).unwrap();
        let exporter = CountingExporter { calls: Cell::new(0) };
        assert_eq!(export_rendering("x", &rendering, &exporter).unwrap(), PathBuf::from("memory"));
        assert_eq!(exporter.calls.get(), 1);
    }
}
