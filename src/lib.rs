// src/lib.rs

//! Raster drawing into caller-owned pixel buffers.
//!
//! A [`FrameBuffer`] wraps a byte buffer in one of eight packed pixel formats
//! and provides clipped fills, lines, ellipses, polygons, blits and scrolling.
//! Text comes from compressed bitmap fonts held in a [`FontStore`]: glyphs are
//! found through a sparse Unicode interval table, decompressed on demand and
//! alpha-blended into whatever format the surface uses.
//!
//! ```text
//! host calls ──► FrameBuffer ──► PixelFormat (set / get / fill_run)
//!          └──► write() ──► Codepoints ──► FontStore (resolve, materialize)
//!                                   └──► coverage ──► blend ──► FrameBuffer
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod format;
pub mod framebuffer;
pub mod image;
pub mod text;

pub use color::{blend, rgb888_to_color, FontProperties};
pub use config::{Config, SurfaceConfig, TextConfig};
pub use error::{FontError, InflateError, SurfaceError};
pub use font::{
    BitDepth, FontDescriptor, FontParts, FontStore, GfxFont, Glyph, GlyphBitmap, Inflate,
    UnicodeInterval, ZlibInflater,
};
pub use format::{PixelAddr, PixelFormat};
pub use framebuffer::{FrameBuffer, Quadrants};
pub use image::{BlockImageDecoder, ImageRect, RectSink, SurfaceSink};
pub use text::{Codepoints, Rect, TextStats};
