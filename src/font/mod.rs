// src/font/mod.rs

//! Compressed bitmap fonts with sparse Unicode lookup.
//!
//! A font is a shared bitmap blob plus two owned tables: per-glyph metrics,
//! and a sorted list of code point intervals mapping into the glyph table.
//! [`FontStore`] holds the current font and the decompressor that turns a
//! glyph's stored bytes into a bitmap ready for sampling.

pub mod bitmap;
pub mod descriptor;
pub mod inflate;


use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::TextConfig;
use crate::error::{FontError, InflateError};

pub use bitmap::GlyphBitmap;
pub use descriptor::FontDescriptor;
pub use inflate::{Inflate, ZlibInflater};

/// Metrics and storage location of one glyph.
///
/// Serialized as the ingestion tuple
/// `(width, height, x_advance, left, top, compressed_size, data_offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "(u8, u8, u16, i16, i16, u32, u32)",
    into = "(u8, u8, u16, i16, i16, u32, u32)"
)]
pub struct Glyph {
    pub width: u8,
    pub height: u8,
    /// Horizontal cursor advance after drawing.
    pub x_advance: u16,
    /// Offset from the cursor to the bitmap's left edge.
    pub left: i16,
    /// Distance from the baseline up to the bitmap's top edge.
    pub top: i16,
    /// Stored byte count in a compressed font.
    pub compressed_size: u32,
    /// Index of the glyph's first byte in the bitmap blob.
    pub data_offset: u32,
}

impl From<(u8, u8, u16, i16, i16, u32, u32)> for Glyph {
    fn from(t: (u8, u8, u16, i16, i16, u32, u32)) -> Self {
        Glyph {
            width: t.0,
            height: t.1,
            x_advance: t.2,
            left: t.3,
            top: t.4,
            compressed_size: t.5,
            data_offset: t.6,
        }
    }
}

impl From<Glyph> for (u8, u8, u16, i16, i16, u32, u32) {
    fn from(g: Glyph) -> Self {
        (
            g.width,
            g.height,
            g.x_advance,
            g.left,
            g.top,
            g.compressed_size,
            g.data_offset,
        )
    }
}

/// Inclusive code point range `first..=last`, whose glyphs start at
/// `offset` in the glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, u32)", into = "(u32, u32, u32)")]
pub struct UnicodeInterval {
    pub first: u32,
    pub last: u32,
    pub offset: u32,
}

impl UnicodeInterval {
    pub const fn new(first: u32, last: u32, offset: u32) -> Self {
        Self {
            first,
            last,
            offset,
        }
    }

    pub const fn contains(&self, codepoint: u32) -> bool {
        self.first <= codepoint && codepoint <= self.last
    }
}

impl From<(u32, u32, u32)> for UnicodeInterval {
    fn from((first, last, offset): (u32, u32, u32)) -> Self {
        Self::new(first, last, offset)
    }
}

impl From<UnicodeInterval> for (u32, u32, u32) {
    fn from(iv: UnicodeInterval) -> Self {
        (iv.first, iv.last, iv.offset)
    }
}

/// Bits of coverage stored per glyph pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BitDepth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl BitDepth {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Coverage value meaning "fully inside the glyph".
    pub const fn max_coverage(self) -> u32 {
        (1 << self.bits()) - 1
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = FontError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(BitDepth::One),
            2 => Ok(BitDepth::Two),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            other => Err(FontError::UnsupportedBitDepth(other)),
        }
    }
}

/// Borrowed pieces a font is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct FontParts<'a> {
    pub bitmap: &'a [u8],
    pub glyphs: &'a [Glyph],
    pub intervals: &'a [UnicodeInterval],
    /// How many leading entries of `intervals` are live.
    pub interval_count: usize,
    pub compressed: bool,
    pub y_advance: u16,
    pub ascender: i16,
    pub descender: i16,
    pub bits_per_pixel: u8,
}

/// Copies `items` into a new vector, reporting allocation failure.
fn try_to_vec<T: Copy>(items: &[T]) -> Result<Vec<T>, FontError> {
    let mut out = Vec::new();
    out.try_reserve_exact(items.len())?;
    out.extend_from_slice(items);
    Ok(out)
}

/// A validated font: owned glyph and interval tables over a borrowed blob.
#[derive(Debug, Clone)]
pub struct GfxFont<'a> {
    bitmap: &'a [u8],
    glyphs: Vec<Glyph>,
    intervals: Vec<UnicodeInterval>,
    compressed: bool,
    bit_depth: BitDepth,
    y_advance: u16,
    ascender: i16,
    descender: i16,
}

impl<'a> GfxFont<'a> {
    /// Validates `parts` and copies its tables.
    ///
    /// Intervals must be non-empty, strictly ascending without overlap, and
    /// each must map onto glyphs that exist.
    pub fn new(parts: &FontParts<'a>) -> Result<Self, FontError> {
        let bit_depth = BitDepth::try_from(parts.bits_per_pixel)?;
        let intervals = parts
            .intervals
            .get(..parts.interval_count)
            .ok_or(FontError::IntervalCount {
                count: parts.interval_count,
                available: parts.intervals.len(),
            })?;

        let mut previous_last: Option<u32> = None;
        for (index, iv) in intervals.iter().enumerate() {
            if iv.first > iv.last {
                return Err(FontError::InvalidInterval {
                    index,
                    first: iv.first,
                    last: iv.last,
                });
            }
            if previous_last.is_some_and(|last| iv.first <= last) {
                return Err(FontError::UnsortedInterval { index });
            }
            let final_glyph = iv.offset as usize + (iv.last - iv.first) as usize;
            if final_glyph >= parts.glyphs.len() {
                return Err(FontError::IntervalOutOfRange {
                    index,
                    glyphs: parts.glyphs.len(),
                });
            }
            previous_last = Some(iv.last);
        }

        Ok(GfxFont {
            bitmap: parts.bitmap,
            glyphs: try_to_vec(parts.glyphs)?,
            intervals: try_to_vec(intervals)?,
            compressed: parts.compressed,
            bit_depth,
            y_advance: parts.y_advance,
            ascender: parts.ascender,
            descender: parts.descender,
        })
    }

    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn intervals(&self) -> &[UnicodeInterval] {
        &self.intervals
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Line height.
    pub fn y_advance(&self) -> u16 {
        self.y_advance
    }

    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Looks up the glyph for `codepoint` without substituting anything.
    pub fn resolve(&self, codepoint: u32) -> Option<&Glyph> {
        let index = self.intervals.partition_point(|iv| iv.last < codepoint);
        let iv = self.intervals.get(index)?;
        if !iv.contains(codepoint) {
            return None;
        }
        self.glyphs
            .get(iv.offset as usize + (codepoint - iv.first) as usize)
    }

    /// Produces `glyph`'s bitmap.
    ///
    /// Uncompressed fonts borrow from the blob. Compressed fonts inflate
    /// exactly `compressed_size` stored bytes into a new buffer, which must
    /// come out at exactly the bitmap size.
    pub fn materialize<I: Inflate + ?Sized>(
        &self,
        glyph: &Glyph,
        inflater: &mut I,
    ) -> Result<GlyphBitmap<'a>, FontError> {
        let size = bitmap::bitmap_size(glyph, self.bit_depth);
        let stored = if self.compressed {
            glyph.compressed_size as usize
        } else {
            size
        };

        let blob: &'a [u8] = self.bitmap;
        let offset = glyph.data_offset as usize;
        let end = offset.saturating_add(stored);
        let data = blob.get(offset..end).ok_or(FontError::GlyphDataOutOfRange {
            offset,
            end,
            blob: blob.len(),
        })?;

        if !self.compressed {
            return Ok(GlyphBitmap::Borrowed(data));
        }

        let mut out = Vec::new();
        if size == 0 {
            return Ok(GlyphBitmap::Owned(out));
        }
        out.try_reserve_exact(size)?;
        out.resize(size, 0);
        let written = inflater.inflate(&mut out, data)?;
        if written != size {
            return Err(InflateError::Truncated {
                written,
                expected: size,
            }
            .into());
        }
        Ok(GlyphBitmap::Owned(out))
    }
}

impl fmt::Display for GfxFont<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bpp font, {} glyphs in {} intervals, {}, y_advance {}, ascender {}, descender {}",
            self.bit_depth.bits(),
            self.glyphs.len(),
            self.intervals.len(),
            if self.compressed { "compressed" } else { "uncompressed" },
            self.y_advance,
            self.ascender,
            self.descender,
        )
    }
}

/// The currently loaded font and the decompressor used for its glyphs.
///
/// Loading builds the new font completely before swapping it in, so a failed
/// load leaves the previous font untouched.
#[derive(Debug)]
pub struct FontStore<'a, I: Inflate = ZlibInflater> {
    font: Option<GfxFont<'a>>,
    inflater: I,
    fallback_codepoint: u32,
}

impl<'a> FontStore<'a, ZlibInflater> {
    pub fn new() -> Self {
        Self::with_inflater(ZlibInflater::new())
    }

    pub fn with_config(config: &TextConfig) -> Self {
        let mut store = Self::new();
        store.set_fallback_codepoint(config.fallback_codepoint);
        store
    }
}

impl Default for FontStore<'_, ZlibInflater> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, I: Inflate> FontStore<'a, I> {
    pub fn with_inflater(inflater: I) -> Self {
        Self {
            font: None,
            inflater,
            fallback_codepoint: 0,
        }
    }

    /// Replaces the current font with one built from `parts`.
    pub fn load(&mut self, parts: &FontParts<'a>) -> Result<(), FontError> {
        let font = GfxFont::new(parts)?;
        info!("FontStore: loaded {}", font);
        if let Some(previous) = self.font.replace(font) {
            debug!(
                "FontStore: released previous font ({} glyphs)",
                previous.glyphs().len()
            );
        }
        Ok(())
    }

    pub fn load_descriptor(&mut self, descriptor: &'a FontDescriptor) -> Result<(), FontError> {
        self.load(&descriptor.as_parts())
    }

    /// Drops the current font, returning it.
    pub fn unload(&mut self) -> Option<GfxFont<'a>> {
        let previous = self.font.take();
        if previous.is_some() {
            debug!("FontStore: font unloaded");
        }
        previous
    }

    pub fn font(&self) -> Result<&GfxFont<'a>, FontError> {
        self.font.as_ref().ok_or(FontError::NoFontLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.font.is_some()
    }

    /// Code point substituted for characters the font lacks.
    pub fn fallback_codepoint(&self) -> u32 {
        self.fallback_codepoint
    }

    pub fn set_fallback_codepoint(&mut self, codepoint: u32) {
        self.fallback_codepoint = codepoint;
    }

    /// Looks up `codepoint` in the current font.
    pub fn resolve(&self, codepoint: u32) -> Option<&Glyph> {
        self.font.as_ref()?.resolve(codepoint)
    }

    /// Looks up `codepoint`, falling back to the fallback code point.
    pub fn resolve_or_fallback(&self, codepoint: u32) -> Option<&Glyph> {
        self.resolve(codepoint)
            .or_else(|| self.resolve(self.fallback_codepoint))
    }

    /// Produces the bitmap of `glyph` in the current font.
    pub fn materialize(&mut self, glyph: &Glyph) -> Result<GlyphBitmap<'a>, FontError> {
        let font = self.font.as_ref().ok_or(FontError::NoFontLoaded)?;
        font.materialize(glyph, &mut self.inflater)
    }
}
