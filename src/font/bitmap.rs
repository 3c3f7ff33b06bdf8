// src/font/bitmap.rs

//! Glyph bitmap geometry and coverage sampling.
//!
//! Rows are padded to whole bytes. Within a byte, pixels fill the
//! least-significant field first, so at 4 bpp the even pixel of each pair
//! sits in the low nibble. The same rule holds for every depth.

use std::ops::Deref;

use super::{BitDepth, Glyph};

/// Bytes in one padded bitmap row.
pub fn row_bytes(width: u8, depth: BitDepth) -> usize {
    (usize::from(width) * depth.bits() as usize).div_ceil(8)
}

/// Bytes in a glyph's uncompressed bitmap.
pub fn bitmap_size(glyph: &Glyph, depth: BitDepth) -> usize {
    row_bytes(glyph.width, depth) * usize::from(glyph.height)
}

/// Coverage of the glyph pixel at `(x, y)`, in `0..=depth.max_coverage()`.
///
/// Reads past the end of `bitmap` count as empty.
pub fn coverage(bitmap: &[u8], glyph: &Glyph, depth: BitDepth, x: usize, y: usize) -> u32 {
    let bit = x * depth.bits() as usize;
    let byte = y * row_bytes(glyph.width, depth) + bit / 8;
    let shift = bit % 8;
    bitmap
        .get(byte)
        .map_or(0, |&b| u32::from(b >> shift) & depth.max_coverage())
}

/// A glyph bitmap ready for sampling.
///
/// Uncompressed fonts hand out a view into the font's blob; compressed fonts
/// produce a freshly inflated buffer that the caller owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphBitmap<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl GlyphBitmap<'_> {
    /// Whether this bitmap was allocated for the caller and is released when
    /// dropped.
    pub fn must_release(&self) -> bool {
        matches!(self, GlyphBitmap::Owned(_))
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            GlyphBitmap::Borrowed(bytes) => bytes,
            GlyphBitmap::Owned(bytes) => bytes,
        }
    }
}

impl Deref for GlyphBitmap<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}
