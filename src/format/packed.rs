// src/format/packed.rs

//! Addressing and fills for the byte-and-narrower encodings.

/// Location of one pixel inside a packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelAddr {
    /// Index of the byte holding the pixel.
    pub byte: usize,
    /// Bit offset of the pixel's field inside that byte, counted from the LSB.
    pub shift: u32,
    /// Width of the field in bits.
    pub bits: u32,
}

impl PixelAddr {
    #[inline]
    const fn value_mask(&self) -> u32 {
        (1 << self.bits) - 1
    }

    /// Mask selecting this pixel's field within its byte.
    #[inline]
    pub const fn field_mask(&self) -> u8 {
        ((self.value_mask() << self.shift) & 0xFF) as u8
    }

    #[inline]
    pub fn read(&self, buf: &[u8]) -> u32 {
        (u32::from(buf[self.byte]) >> self.shift) & self.value_mask()
    }

    #[inline]
    pub fn write(&self, buf: &mut [u8], value: u32) {
        let mask = self.field_mask();
        let field = (((value & self.value_mask()) << self.shift) & 0xFF) as u8;
        buf[self.byte] = (buf[self.byte] & !mask) | field;
    }
}

#[inline]
pub(crate) fn mono_vlsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (y >> 3) * stride + x,
        shift: (y & 0x07) as u32,
        bits: 1,
    }
}

#[inline]
pub(crate) fn mono_hlsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (x + y * stride) >> 3,
        shift: 7 - (x & 0x07) as u32,
        bits: 1,
    }
}

#[inline]
pub(crate) fn mono_hmsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (x + y * stride) >> 3,
        shift: (x & 0x07) as u32,
        bits: 1,
    }
}

#[inline]
pub(crate) fn gs2_hmsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (x + y * stride) >> 2,
        shift: ((x & 0x03) << 1) as u32,
        bits: 2,
    }
}

#[inline]
pub(crate) fn gs4_hmsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (x + y * stride) >> 1,
        shift: if x % 2 == 1 { 0 } else { 4 },
        bits: 4,
    }
}

#[inline]
pub(crate) fn gs4_hlsb(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: (x + y * stride) >> 1,
        shift: if x % 2 == 1 { 4 } else { 0 },
        bits: 4,
    }
}

#[inline]
pub(crate) fn gs8(stride: usize, x: usize, y: usize) -> PixelAddr {
    PixelAddr {
        byte: x + y * stride,
        shift: 0,
        bits: 8,
    }
}

/// A byte with every field set to `value`.
fn replicate(value: u32, bits: u32) -> u8 {
    let mut byte = 0u32;
    let mut shift = 0;
    while shift < 8 {
        byte |= value << shift;
        shift += bits;
    }
    (byte & 0xFF) as u8
}

/// Row-major fill: patch pixels up to the first byte boundary, memset the
/// whole bytes in the middle, then patch the tail.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill_rows<F>(
    locate: F,
    bits: u32,
    buf: &mut [u8],
    stride: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: u32,
) where
    F: Fn(usize, usize, usize) -> PixelAddr,
{
    let per_byte = (8 / bits) as usize;
    let pattern = replicate(color, bits);
    let end = x + w;

    for row in y..y + h {
        let row_base = row * stride;
        let mut cx = x;

        while cx < end && (cx + row_base) % per_byte != 0 {
            locate(stride, cx, row).write(buf, color);
            cx += 1;
        }

        let whole = (end - cx) / per_byte;
        if whole > 0 {
            let start = (cx + row_base) / per_byte;
            buf[start..start + whole].fill(pattern);
            cx += whole * per_byte;
        }

        while cx < end {
            locate(stride, cx, row).write(buf, color);
            cx += 1;
        }
    }
}

/// Column-major mono fill, one masked byte operation per column per band of
/// eight rows.
pub(crate) fn fill_columns(
    buf: &mut [u8],
    stride: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    on: bool,
) {
    let end = y + h;
    let mut row = y;
    while row < end {
        let band = row >> 3;
        let band_end = end.min((band + 1) << 3);
        let rows_in_band = band_end - row;
        let mask = ((((1u16 << rows_in_band) - 1) << (row & 0x07)) & 0xFF) as u8;

        let start = band * stride + x;
        for byte in &mut buf[start..start + w] {
            if on {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
        row = band_end;
    }
}
