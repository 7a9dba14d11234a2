//! Contrast-aware per-character colors.
//!
//! Each character is seeded from the MD5 digest of its UTF-8 bytes, then
//! walked through a fixed modular step until it is legible against the
//! selected background. MD5 is kept so output stays reproducible across
//! implementations; nothing here relies on it being a secure hash.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::BackgroundMode;

/// Upper bound on contrast adjustments. Every channel step has a period
/// dividing 256, so the walk revisits its start state within this bound.
pub const MAX_ADJUSTMENTS: u32 = 256;

/// Channel threshold shared by both contrast predicates.
const CHANNEL_MID: u8 = 128;
/// Channel-sum threshold shared by both contrast predicates.
const SUM_MID: u16 = 384;

/// Per-channel step; added on dark backgrounds, subtracted on light ones.
const STEP: [u8; 3] = [50, 30, 70];

/// Normalized RGB color, every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorSpec {
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f32 / 255.0,
            g: rgb[1] as f32 / 255.0,
            b: rgb[2] as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [to_channel(self.r), to_channel(self.g), to_channel(self.b)]
    }

    /// Opaque RGBA for compositing.
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb8();
        [r, g, b, 255]
    }
}

fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Full trace of one color derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDerivation {
    /// Digest-derived starting triple
    pub seed: [u8; 3],
    /// Final triple after adjustment
    pub rgb: [u8; 3],
    /// Number of modular steps applied
    pub adjustments: u32,
    /// Whether the iteration bound was hit and the clamped fallback used
    pub fallback: bool,
}

impl ColorDerivation {
    pub fn color(&self) -> ColorSpec {
        ColorSpec::from_rgb8(self.rgb)
    }
}

/// Derive the color for `ch` against `mode`.
pub fn derive_color(ch: char, mode: BackgroundMode) -> ColorSpec {
    derive_color_traced(ch, mode).color()
}

/// Like [`derive_color`] but returns the seed and adjustment details.
pub fn derive_color_traced(ch: char, mode: BackgroundMode) -> ColorDerivation {
    adjust_for_contrast(digest_seed(ch), mode)
}

/// First three bytes of the MD5 digest of `ch` encoded as UTF-8.
pub fn digest_seed(ch: char) -> [u8; 3] {
    let mut buf = [0u8; 4];
    let digest = Md5::digest(ch.encode_utf8(&mut buf).as_bytes());
    [digest[0], digest[1], digest[2]]
}

/// Walk `seed` until it satisfies the contrast predicate for `mode`.
pub fn adjust_for_contrast(seed: [u8; 3], mode: BackgroundMode) -> ColorDerivation {
    let mut rgb = seed;
    for adjustments in 0..MAX_ADJUSTMENTS {
        if satisfies_contrast(rgb, mode) {
            return ColorDerivation { seed, rgb, adjustments, fallback: false };
        }
        rgb = step(rgb, mode);
    }
    if satisfies_contrast(rgb, mode) {
        return ColorDerivation { seed, rgb, adjustments: MAX_ADJUSTMENTS, fallback: false };
    }

    let clamped = clamp_to_contrast(rgb, mode);
    log::warn!(
        "contrast walk for seed {:?} did not converge on {:?}; clamped {:?} -> {:?}",
        seed,
        mode,
        rgb,
        clamped
    );
    ColorDerivation { seed, rgb: clamped, adjustments: MAX_ADJUSTMENTS, fallback: true }
}

/// Dark backgrounds need `max >= 128 && sum >= 384`; light backgrounds need
/// `min <= 128 && sum <= 384`. Both conditions must hold at once.
pub fn satisfies_contrast(rgb: [u8; 3], mode: BackgroundMode) -> bool {
    let sum: u16 = rgb.iter().map(|&c| c as u16).sum();
    match mode {
        BackgroundMode::Dark => rgb.iter().any(|&c| c >= CHANNEL_MID) && sum >= SUM_MID,
        BackgroundMode::Light => rgb.iter().any(|&c| c <= CHANNEL_MID) && sum <= SUM_MID,
    }
}

fn step(rgb: [u8; 3], mode: BackgroundMode) -> [u8; 3] {
    let mut out = rgb;
    for (c, d) in out.iter_mut().zip(STEP) {
        *c = match mode {
            BackgroundMode::Dark => c.wrapping_add(d),
            BackgroundMode::Light => c.wrapping_sub(d),
        };
    }
    out
}

// Pulling every channel to the midpoint satisfies both halves of the predicate.
fn clamp_to_contrast(rgb: [u8; 3], mode: BackgroundMode) -> [u8; 3] {
    rgb.map(|c| match mode {
        BackgroundMode::Dark => c.max(CHANNEL_MID),
        BackgroundMode::Light => c.min(CHANNEL_MID),
    })
}
