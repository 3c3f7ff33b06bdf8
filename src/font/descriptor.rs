// src/font/descriptor.rs

//! Owned, deserializable form of a font, as produced by the font converter.
//!
//! A descriptor owns the bitmap blob. Fonts built from it borrow that blob,
//! so one descriptor can back any number of stores.

use std::io::Read;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{FontParts, Glyph, UnicodeInterval};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub bitmap: Vec<u8>,
    pub glyphs: Vec<Glyph>,
    pub intervals: Vec<UnicodeInterval>,
    /// Number of live intervals; all of them when absent.
    #[serde(default)]
    pub interval_count: Option<usize>,
    #[serde(default)]
    pub compressed: bool,
    pub y_advance: u16,
    pub ascender: i16,
    pub descender: i16,
    pub bits_per_pixel: u8,
}

impl FontDescriptor {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse font descriptor")
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("failed to read font descriptor")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize font descriptor")
    }

    /// Borrowed view suitable for [`FontStore::load`](super::FontStore::load).
    pub fn as_parts(&self) -> FontParts<'_> {
        FontParts {
            bitmap: &self.bitmap,
            glyphs: &self.glyphs,
            intervals: &self.intervals,
            interval_count: self.interval_count.unwrap_or(self.intervals.len()),
            compressed: self.compressed,
            y_advance: self.y_advance,
            ascender: self.ascender,
            descender: self.descender,
            bits_per_pixel: self.bits_per_pixel,
        }
    }
}
