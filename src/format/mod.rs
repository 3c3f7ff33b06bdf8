// src/format/mod.rs

//! Pixel encodings supported by a [`FrameBuffer`](crate::framebuffer::FrameBuffer).
//!
//! Every encoding exposes the same three operations (`set`, `get`, `fill_run`)
//! over a raw byte buffer and a stride. None of them bounds-check: the
//! framebuffer clips coordinates before calling in, and validates the buffer
//! length once at construction.
//!
//! The sub-byte encodings are described by an explicit addressing function
//! returning a [`PixelAddr`], so that bit placement can be tested on its own.

mod packed;
mod rgb565;


pub use packed::PixelAddr;
pub(crate) use rgb565::{join as join_rgb565, split as split_rgb565};

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// The closed set of pixel encodings.
///
/// Discriminants are the numeric format constants hosts pass at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PixelFormat {
    /// 1 bpp, each byte is a vertical run of 8 pixels, LSB at the top.
    #[serde(rename = "MONO_VLSB")]
    MonoVlsb = 0,
    /// 16 bpp, 5/6/5 bit fields, little-endian cells.
    #[serde(rename = "RGB565")]
    Rgb565 = 1,
    /// 4 bpp, row-major, even x in the high nibble.
    #[serde(rename = "GS4_HMSB")]
    Gs4Hmsb = 2,
    /// 1 bpp, row-major, leftmost pixel in bit 7.
    #[serde(rename = "MONO_HLSB")]
    MonoHlsb = 3,
    /// 1 bpp, row-major, leftmost pixel in bit 0.
    #[serde(rename = "MONO_HMSB")]
    MonoHmsb = 4,
    /// 2 bpp, row-major, leftmost pixel in the lowest bit pair.
    #[serde(rename = "GS2_HMSB")]
    Gs2Hmsb = 5,
    /// 8 bpp, one byte per pixel.
    #[serde(rename = "GS8")]
    Gs8 = 6,
    /// 4 bpp, row-major, even x in the low nibble.
    #[serde(rename = "GS4_HLSB")]
    Gs4Hlsb = 7,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 8] = [
        PixelFormat::MonoVlsb,
        PixelFormat::Rgb565,
        PixelFormat::Gs4Hmsb,
        PixelFormat::MonoHlsb,
        PixelFormat::MonoHmsb,
        PixelFormat::Gs2Hmsb,
        PixelFormat::Gs8,
        PixelFormat::Gs4Hlsb,
    ];

    /// Numeric format constant.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::MonoVlsb | PixelFormat::MonoHlsb | PixelFormat::MonoHmsb => 1,
            PixelFormat::Gs2Hmsb => 2,
            PixelFormat::Gs4Hmsb | PixelFormat::Gs4Hlsb => 4,
            PixelFormat::Gs8 => 8,
            PixelFormat::Rgb565 => 16,
        }
    }

    /// Largest color value a pixel can hold.
    pub const fn max_color(self) -> u32 {
        match self {
            PixelFormat::Rgb565 => 0xFFFF,
            other => (1 << other.bits_per_pixel()) - 1,
        }
    }

    pub const fn is_mono(self) -> bool {
        matches!(
            self,
            PixelFormat::MonoVlsb | PixelFormat::MonoHlsb | PixelFormat::MonoHmsb
        )
    }

    /// Pixel granularity a row stride is rounded up to.
    ///
    /// Row-major sub-byte formats need every row to start on a byte boundary.
    /// The column-major mono format packs vertically, so any stride works.
    pub const fn stride_alignment(self) -> usize {
        match self {
            PixelFormat::MonoHlsb | PixelFormat::MonoHmsb => 8,
            PixelFormat::Gs2Hmsb => 4,
            PixelFormat::Gs4Hmsb | PixelFormat::Gs4Hlsb => 2,
            PixelFormat::MonoVlsb | PixelFormat::Rgb565 | PixelFormat::Gs8 => 1,
        }
    }

    /// `stride` rounded up to the format's granularity, or `None` if that
    /// overflows.
    pub fn align_stride(self, stride: usize) -> Option<usize> {
        stride.checked_next_multiple_of(self.stride_alignment())
    }

    /// Number of bytes a `width` x `height` surface with the given stride
    /// spans, i.e. one past the last byte any pixel of it touches. `None` if
    /// that isn't representable.
    pub fn required_len(self, width: usize, height: usize, stride: usize) -> Option<usize> {
        if width == 0 || height == 0 {
            return Some(0);
        }
        let (last_x, last_y) = (width - 1, height - 1);
        // Every addressing function is bounded by this linear index, so once
        // it fits, locating the last pixel can't overflow.
        let last = last_y.checked_mul(stride)?.checked_add(last_x)?;
        match self.locate(stride, last_x, last_y) {
            Some(addr) => addr.byte.checked_add(1),
            None => last.checked_add(1)?.checked_mul(2),
        }
    }

    /// Aligned stride and required buffer length of a surface.
    ///
    /// `stride` defaults to `width`. Fails when the geometry can't be
    /// addressed.
    pub fn layout(
        self,
        width: usize,
        height: usize,
        stride: Option<usize>,
    ) -> Result<(usize, usize), SurfaceError> {
        let requested = stride.unwrap_or(width);
        let too_large = || SurfaceError::TooLarge {
            format: self,
            width,
            height,
            stride: requested,
        };
        let stride = self.align_stride(requested).ok_or_else(too_large)?;
        let required = self
            .required_len(width, height, stride)
            .ok_or_else(too_large)?;
        Ok((stride, required))
    }

    /// Bit-level address of a pixel, for every format narrower than 16 bits.
    pub fn locate(self, stride: usize, x: usize, y: usize) -> Option<PixelAddr> {
        let addr = match self {
            PixelFormat::MonoVlsb => packed::mono_vlsb(stride, x, y),
            PixelFormat::MonoHlsb => packed::mono_hlsb(stride, x, y),
            PixelFormat::MonoHmsb => packed::mono_hmsb(stride, x, y),
            PixelFormat::Gs2Hmsb => packed::gs2_hmsb(stride, x, y),
            PixelFormat::Gs4Hmsb => packed::gs4_hmsb(stride, x, y),
            PixelFormat::Gs4Hlsb => packed::gs4_hlsb(stride, x, y),
            PixelFormat::Gs8 => packed::gs8(stride, x, y),
            PixelFormat::Rgb565 => return None,
        };
        Some(addr)
    }

    /// Reduces an arbitrary color to what this format stores.
    ///
    /// Mono formats treat any non-zero color as "on".
    pub const fn normalize(self, color: u32) -> u32 {
        if self.is_mono() {
            (color != 0) as u32
        } else {
            color & self.max_color()
        }
    }

    #[inline]
    pub fn set(self, buf: &mut [u8], stride: usize, x: usize, y: usize, color: u32) {
        match self.locate(stride, x, y) {
            Some(addr) => addr.write(buf, self.normalize(color)),
            None => rgb565::set(buf, stride, x, y, color),
        }
    }

    #[inline]
    pub fn get(self, buf: &[u8], stride: usize, x: usize, y: usize) -> u32 {
        match self.locate(stride, x, y) {
            Some(addr) => addr.read(buf),
            None => rgb565::get(buf, stride, x, y),
        }
    }

    /// Fills a `w` x `h` block whose top-left pixel is `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_run(
        self,
        buf: &mut [u8],
        stride: usize,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        color: u32,
    ) {
        let color = self.normalize(color);
        match self {
            PixelFormat::Rgb565 => rgb565::fill(buf, stride, x, y, w, h, color),
            PixelFormat::MonoVlsb => packed::fill_columns(buf, stride, x, y, w, h, color != 0),
            PixelFormat::MonoHlsb => {
                packed::fill_rows(packed::mono_hlsb, 1, buf, stride, x, y, w, h, color)
            }
            PixelFormat::MonoHmsb => {
                packed::fill_rows(packed::mono_hmsb, 1, buf, stride, x, y, w, h, color)
            }
            PixelFormat::Gs2Hmsb => {
                packed::fill_rows(packed::gs2_hmsb, 2, buf, stride, x, y, w, h, color)
            }
            PixelFormat::Gs4Hmsb => {
                packed::fill_rows(packed::gs4_hmsb, 4, buf, stride, x, y, w, h, color)
            }
            PixelFormat::Gs4Hlsb => {
                packed::fill_rows(packed::gs4_hlsb, 4, buf, stride, x, y, w, h, color)
            }
            PixelFormat::Gs8 => packed::fill_rows(packed::gs8, 8, buf, stride, x, y, w, h, color),
        }
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = SurfaceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.code() == code)
            .ok_or(SurfaceError::UnknownFormat(code))
    }
}
