//! Rendering: layout, paint ordering, rasterization and the output bitmap

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;
#[cfg(feature = "truetype")]
pub mod truetype;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Largest bitmap the rasterizer will allocate (256 Mpx, 1 GiB of RGBA).
pub const MAX_BITMAP_PIXELS: u64 = 1 << 28;

/// RGBA8 pixel buffer produced by the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// Allocate a fully transparent buffer, reporting oversize or refused
    /// allocations instead of aborting.
    pub fn allocate(width: u32, height: u32) -> Result<Self> {
        let exhausted = || Error::ResourceExhausted { width, height };
        let pixels = (width as u64) * (height as u64);
        if pixels > MAX_BITMAP_PIXELS {
            return Err(exhausted());
        }
        let len = usize::try_from(pixels * 4).map_err(|_| exhausted())?;

        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| exhausted())?;
        buf.resize(len, 0);

        let image = RgbaImage::from_raw(width, height, buf).ok_or_else(exhausted)?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: [u8; 4]) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = ((x as i64 + width as i64).max(0) as u64).min(self.width() as u64) as u32;
        let y1 = ((y as i64 + height as i64).max(0) as u64).min(self.height() as u64) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.get_pixel_mut(px, py).0 = rgba;
            }
        }
    }

    /// Source-over blend of `rgba` scaled by `coverage`; out-of-bounds is ignored.
    pub(crate) fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4], coverage: u8) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 || coverage == 0 {
            return;
        }
        let alpha = (rgba[3] as u32 * coverage as u32 + 127) / 255;
        let dst = &mut self.image.get_pixel_mut(x as u32, y as u32).0;
        for c in 0..3 {
            dst[c] = ((rgba[c] as u32 * alpha + dst[c] as u32 * (255 - alpha) + 127) / 255) as u8;
        }
        dst[3] = (alpha + dst[3] as u32 * (255 - alpha) / 255).min(255) as u8;
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            self.as_raw(),
            self.width(),
            self.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }

    /// Hex SHA-256 over the dimensions and pixels; equal bitmaps have equal digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width().to_le_bytes());
        hasher.update(self.height().to_le_bytes());
        hasher.update(self.as_raw());
        hex::encode(hasher.finalize())
    }
}
