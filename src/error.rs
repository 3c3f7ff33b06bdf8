// src/error.rs

//! Error types for surface construction, font ingestion and glyph inflation.
//!
//! Out-of-bounds drawing is never an error: every primitive clips silently.
//! The enums here cover the conditions a host has to react to.

use std::collections::TryReserveError;
use thiserror::Error;

use crate::format::PixelFormat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid format code {0}")]
    UnknownFormat(u8),
    #[error(
        "buffer too small for {format:?} surface {width}x{height} (stride {stride}): need {required} bytes, got {actual}"
    )]
    BufferTooSmall {
        format: PixelFormat,
        width: usize,
        height: usize,
        stride: usize,
        required: usize,
        actual: usize,
    },
    #[error("{format:?} surface {width}x{height} (stride {stride}) exceeds the addressable size")]
    TooLarge {
        format: PixelFormat,
        width: usize,
        height: usize,
        stride: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InflateError {
    #[error("corrupt compressed glyph data: {0}")]
    Corrupt(String),
    #[error("compressed stream ended early: wrote {written} of {expected} bytes")]
    Truncated { written: usize, expected: usize },
}

impl From<flate2::DecompressError> for InflateError {
    fn from(err: flate2::DecompressError) -> Self {
        InflateError::Corrupt(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("no font loaded")]
    NoFontLoaded,
    #[error("unsupported glyph bit depth {0} (expected 1, 2, 4 or 8)")]
    UnsupportedBitDepth(u8),
    #[error("interval count {count} exceeds the {available} intervals supplied")]
    IntervalCount { count: usize, available: usize },
    #[error("interval {index} is empty or reversed ({first}..={last})")]
    InvalidInterval { index: usize, first: u32, last: u32 },
    #[error("interval {index} overlaps or precedes the previous interval")]
    UnsortedInterval { index: usize },
    #[error("interval {index} maps past the end of the glyph table ({glyphs} glyphs)")]
    IntervalOutOfRange { index: usize, glyphs: usize },
    #[error("glyph data {offset}..{end} lies outside the {blob}-byte bitmap blob")]
    GlyphDataOutOfRange { offset: usize, end: usize, blob: usize },
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    #[error(transparent)]
    Inflate(#[from] InflateError),
}
