// src/color.rs

//! Text colors and the per-format color arithmetic used by text and images.
//!
//! Colors are plain `u32` values in the destination format's own encoding:
//! a 0/1 bit for mono surfaces, a gray level for the GS formats and a packed
//! 5/6/5 word for RGB565.

use serde::{Deserialize, Serialize};

use crate::format::{join_rgb565, split_rgb565, PixelFormat};

/// Foreground/background pair for one text draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontProperties {
    /// Color written where glyph coverage is full.
    pub fg_color: u32,
    /// Color written where glyph coverage is zero.
    pub bg_color: u32,
}

impl Default for FontProperties {
    fn default() -> Self {
        FontProperties {
            fg_color: 0x0000,
            bg_color: 0xFFFF,
        }
    }
}

impl FontProperties {
    pub const fn new(fg_color: u32, bg_color: u32) -> Self {
        Self { fg_color, bg_color }
    }
}

/// Rounded linear interpolation from `bg` (alpha 0) to `fg` (alpha `alpha_max`).
fn lerp(bg: u32, fg: u32, alpha: u32, alpha_max: u32) -> u32 {
    let (bg, fg) = (u64::from(bg), u64::from(fg));
    let (alpha, alpha_max) = (u64::from(alpha), u64::from(alpha_max));
    ((bg * (alpha_max - alpha) + fg * alpha + alpha_max / 2) / alpha_max) as u32
}

/// Maps glyph coverage to a color of `format`.
///
/// `alpha` ranges over `0..=alpha_max`. Both colors are first clamped to the
/// format's range; the endpoints then return them as they are, and anything
/// between interpolates per channel.
pub fn blend(format: PixelFormat, props: &FontProperties, alpha: u32, alpha_max: u32) -> u32 {
    let max = format.max_color();
    let (fg, bg) = (props.fg_color.min(max), props.bg_color.min(max));
    if alpha == 0 {
        return bg;
    }
    if alpha >= alpha_max {
        return fg;
    }

    match format {
        PixelFormat::Rgb565 => {
            let (fr, fg, fb) = split_rgb565(fg);
            let (br, bg, bb) = split_rgb565(bg);
            join_rgb565(
                lerp(br, fr, alpha, alpha_max),
                lerp(bg, fg, alpha, alpha_max),
                lerp(bb, fb, alpha, alpha_max),
            )
        }
        _ => lerp(bg, fg, alpha, alpha_max),
    }
}

/// Perceptual luminance of an RGB888 triple, 0..=255.
pub const fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 38 + g as u32 * 75 + b as u32 * 15) >> 7) as u8
}

/// Converts an RGB888 triple to a color of `format`.
///
/// RGB565 keeps the channels; every other format stores the luminance reduced
/// to its bit depth.
pub fn rgb888_to_color(format: PixelFormat, r: u8, g: u8, b: u8) -> u32 {
    match format {
        PixelFormat::Rgb565 => join_rgb565(
            u32::from(r) >> 3,
            u32::from(g) >> 2,
            u32::from(b) >> 3,
        ),
        other => u32::from(luminance(r, g, b)) >> (8 - other.bits_per_pixel()),
    }
}
