// src/text/mod.rs

//! Drawing and measuring text with a [`FontStore`](crate::font::FontStore),
//! plus a fixed 8x8 ASCII font that needs no store.

pub mod builtin;
pub mod decoder;
pub mod renderer;

pub use builtin::BUILTIN_GLYPH_SIZE;
pub use decoder::{next_codepoint, Codepoints, REPLACEMENT_CHARACTER};
pub use renderer::{Rect, TextStats};
