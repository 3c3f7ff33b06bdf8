// src/format/rgb565.rs

//! 16-bit RGB565 cells, stored little-endian.

#[inline]
fn offset(stride: usize, x: usize, y: usize) -> usize {
    (x + y * stride) * 2
}

#[inline]
pub(crate) fn set(buf: &mut [u8], stride: usize, x: usize, y: usize, color: u32) {
    let i = offset(stride, x, y);
    buf[i..i + 2].copy_from_slice(&(color as u16).to_le_bytes());
}

#[inline]
pub(crate) fn get(buf: &[u8], stride: usize, x: usize, y: usize) -> u32 {
    let i = offset(stride, x, y);
    u32::from(u16::from_le_bytes([buf[i], buf[i + 1]]))
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn fill(
    buf: &mut [u8],
    stride: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    color: u32,
) {
    let cell = (color as u16).to_le_bytes();
    for row in y..y + h {
        let start = offset(stride, x, row);
        for px in buf[start..start + w * 2].chunks_exact_mut(2) {
            px.copy_from_slice(&cell);
        }
    }
}

/// Splits a color into its (r5, g6, b5) fields.
pub(crate) const fn split(color: u32) -> (u32, u32, u32) {
    ((color >> 11) & 0x1F, (color >> 5) & 0x3F, color & 0x1F)
}

pub(crate) const fn join(r: u32, g: u32, b: u32) -> u32 {
    ((r & 0x1F) << 11) | ((g & 0x3F) << 5) | (b & 0x1F)
}
