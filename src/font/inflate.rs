// src/font/inflate.rs

//! Decompression backend for compressed glyph bitmaps.
//!
//! The font store only needs "fill this buffer from that stream". The
//! [`Inflate`] trait is that seam; [`ZlibInflater`] implements it with
//! `flate2` for the zlib streams the font converter emits.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::InflateError;

/// Decompresses one glyph's data.
pub trait Inflate {
    /// Inflates `src` into `dst`, returning the number of bytes written.
    ///
    /// A stream that ends before `dst` is full is not an error here; the
    /// caller compares the count against what it expected.
    fn inflate(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, InflateError>;
}

/// zlib-wrapped DEFLATE, reusing one decompressor across glyphs.
pub struct ZlibInflater {
    decompress: Decompress,
}

impl ZlibInflater {
    pub fn new() -> Self {
        Self {
            decompress: Decompress::new(true),
        }
    }
}

impl Default for ZlibInflater {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ZlibInflater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZlibInflater").finish_non_exhaustive()
    }
}

impl Inflate for ZlibInflater {
    fn inflate(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, InflateError> {
        self.decompress.reset(true);
        let status = self
            .decompress
            .decompress(src, dst, FlushDecompress::Finish)?;
        let written = self.decompress.total_out() as usize;

        match status {
            Status::StreamEnd => Ok(written),
            // Output space ran out before the stream did.
            _ if written == dst.len() => Err(InflateError::Corrupt(format!(
                "stream holds more than the {} bytes expected",
                dst.len()
            ))),
            _ => Ok(written),
        }
    }
}
