// src/image.rs

//! Drawing images produced by an external block decoder.
//!
//! Block-based decoders (baseline JPEG and the like) emit the picture as a
//! series of small RGB888 rectangles. This module defines that interface and
//! the sink that converts each rectangle to the surface's pixel format.

use std::io::Read;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::color::rgb888_to_color;
use crate::framebuffer::FrameBuffer;

/// Image-space rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl ImageRect {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left) + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top) + 1
    }

    /// Bytes of RGB888 data covering the rectangle.
    pub fn rgb_len(&self) -> usize {
        self.width() as usize * self.height() as usize * 3
    }
}

/// Receives decoded rectangles.
pub trait RectSink {
    /// `rgb` holds the rectangle's pixels row by row, three bytes each.
    fn put_rect(&mut self, rect: &ImageRect, rgb: &[u8]) -> Result<()>;
}

/// A decoder that pulls compressed bytes from `source` and pushes pixels
/// into `sink`.
pub trait BlockImageDecoder {
    /// Decodes one image, returning its `(width, height)`.
    fn decode(&mut self, source: &mut dyn Read, sink: &mut dyn RectSink) -> Result<(u32, u32)>;
}

/// Writes decoded rectangles into a surface, offset by `(x, y)` and clipped.
pub struct SurfaceSink<'f, B> {
    fb: &'f mut FrameBuffer<B>,
    x: i64,
    y: i64,
}

impl<'f, B: AsRef<[u8]> + AsMut<[u8]>> SurfaceSink<'f, B> {
    pub fn new(fb: &'f mut FrameBuffer<B>, x: i32, y: i32) -> Self {
        Self {
            fb,
            x: x.into(),
            y: y.into(),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> RectSink for SurfaceSink<'_, B> {
    fn put_rect(&mut self, rect: &ImageRect, rgb: &[u8]) -> Result<()> {
        if rect.right < rect.left || rect.bottom < rect.top {
            bail!("inverted image rectangle {:?}", rect);
        }
        if rgb.len() < rect.rgb_len() {
            bail!(
                "image rectangle {:?} needs {} bytes of pixel data, got {}",
                rect,
                rect.rgb_len(),
                rgb.len()
            );
        }

        let format = self.fb.format();
        let width = rect.width() as usize;
        for (row, line) in rgb.chunks_exact(width * 3).take(rect.height() as usize).enumerate() {
            let dy = self.y + i64::from(rect.top) + row as i64;
            for (col, px) in line.chunks_exact(3).enumerate() {
                let dx = self.x + i64::from(rect.left) + col as i64;
                self.fb.plot(dx, dy, rgb888_to_color(format, px[0], px[1], px[2]));
            }
        }
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Decodes an image from `source` and draws it with its top-left corner
    /// at `(x, y)`. Returns the decoded image size.
    pub fn draw_image<D, R>(
        &mut self,
        decoder: &mut D,
        mut source: R,
        x: i32,
        y: i32,
    ) -> Result<(u32, u32)>
    where
        D: BlockImageDecoder + ?Sized,
        R: Read,
    {
        let mut sink = SurfaceSink::new(self, x, y);
        let (width, height) = decoder
            .decode(&mut source, &mut sink)
            .context("failed to decode image")?;
        debug!("draw_image: {}x{} image at ({}, {})", width, height, x, y);
        Ok((width, height))
    }
}
