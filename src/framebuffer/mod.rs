// src/framebuffer/mod.rs

//! A drawing surface over a caller-owned pixel buffer.
//!
//! `FrameBuffer` records geometry and encoding and borrows (or owns) any byte
//! container. All drawing clips against the surface; coordinates outside it
//! are dropped silently rather than reported.
//!
//! Primitives live in sibling modules:
//! - [`primitives`]: line, ellipse and polygon
//! - [`blit`]: surface-to-surface copies and in-place scrolling

pub mod blit;
pub mod primitives;

#[cfg(test)]
mod tests;

use log::debug;

use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::format::PixelFormat;

pub use primitives::Quadrants;

#[derive(Debug, Clone)]
pub struct FrameBuffer<B> {
    buf: B,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    byte_len: usize,
}

impl<B: AsRef<[u8]>> FrameBuffer<B> {
    /// Wraps `buf` as a `width` x `height` surface.
    ///
    /// `stride` defaults to `width` and is rounded up to the format's
    /// granularity. Fails if the geometry is too large to address or `buf`
    /// cannot hold every pixel of the surface.
    pub fn new(
        buf: B,
        width: usize,
        height: usize,
        format: PixelFormat,
        stride: Option<usize>,
    ) -> Result<Self, SurfaceError> {
        let (stride, required) = format.layout(width, height, stride)?;
        let actual = buf.as_ref().len();
        if actual < required {
            return Err(SurfaceError::BufferTooSmall {
                format,
                width,
                height,
                stride,
                required,
                actual,
            });
        }

        debug!(
            "FrameBuffer: {}x{} {:?}, stride {}, {} of {} bytes used",
            width, height, format, stride, required, actual
        );
        Ok(Self {
            buf,
            width,
            height,
            stride,
            format,
            byte_len: required,
        })
    }

    /// Like [`FrameBuffer::new`], taking the numeric format constant.
    pub fn with_format_code(
        buf: B,
        width: usize,
        height: usize,
        code: u8,
        stride: Option<usize>,
    ) -> Result<Self, SurfaceError> {
        let format = PixelFormat::try_from(code)?;
        Self::new(buf, width, height, format, stride)
    }

    pub fn from_config(buf: B, config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        Self::new(buf, config.width, config.height, config.format, config.stride)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in pixels.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes of the underlying buffer the surface spans.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The pixel bytes the surface spans.
    pub fn buffer(&self) -> &[u8] {
        &self.buf.as_ref()[..self.byte_len]
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Whether `(x, y)` is a pixel of this surface.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    /// Reads a pixel; `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let (x, y) = (i64::from(x), i64::from(y));
        self.contains(x, y).then(|| self.get(x as usize, y as usize))
    }

    /// Unchecked read; the caller guarantees the coordinates are on-surface.
    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> u32 {
        self.format.get(self.buf.as_ref(), self.stride, x, y)
    }

    /// Clips a rectangle to the surface, returning `(x, y, w, h)` of the
    /// visible part, or `None` if nothing is left.
    pub(crate) fn clip(
        &self,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
    ) -> Option<(usize, usize, usize, usize)> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i64);
        let y1 = (y + h).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((
            x0 as usize,
            y0 as usize,
            (x1 - x0) as usize,
            (y1 - y0) as usize,
        ))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        let len = self.byte_len;
        &mut self.buf.as_mut()[..len]
    }

    /// Unchecked write; the caller guarantees the coordinates are on-surface.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: u32) {
        self.format.set(self.buf.as_mut(), self.stride, x, y, color);
    }

    /// Bounds-checked write in wide coordinates, used by the primitives.
    #[inline]
    pub(crate) fn plot(&mut self, x: i64, y: i64, color: u32) {
        if self.contains(x, y) {
            self.put(x as usize, y as usize, color);
        }
    }

    /// Writes a pixel; a no-op outside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        self.plot(i64::from(x), i64::from(y), color);
    }

    /// Writes a pixel only when `enable` is set.
    pub fn masked_set(&mut self, x: i32, y: i32, color: u32, enable: bool) {
        if enable {
            self.set_pixel(x, y, color);
        }
    }

    pub(crate) fn fill_rect_wide(&mut self, x: i64, y: i64, w: i64, h: i64, color: u32) {
        if let Some((x, y, w, h)) = self.clip(x, y, w, h) {
            self.format
                .fill_run(self.buf.as_mut(), self.stride, x, y, w, h, color);
        }
    }

    /// Fills the whole surface.
    pub fn fill(&mut self, color: u32) {
        let (width, height) = (self.width as i64, self.height as i64);
        self.fill_rect_wide(0, 0, width, height, color);
    }

    /// Fills a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        self.fill_rect_wide(x.into(), y.into(), w.into(), h.into(), color);
    }

    pub fn hline(&mut self, x: i32, y: i32, w: i32, color: u32) {
        self.fill_rect(x, y, w, 1, color);
    }

    pub fn vline(&mut self, x: i32, y: i32, h: i32, color: u32) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// Draws a rectangle outline, or a filled rectangle when `fill` is set.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32, fill: bool) {
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        if fill {
            self.fill_rect_wide(x, y, w, h, color);
        } else {
            self.fill_rect_wide(x, y, w, 1, color);
            self.fill_rect_wide(x, y + h - 1, w, 1, color);
            self.fill_rect_wide(x, y, 1, h, color);
            self.fill_rect_wide(x + w - 1, y, 1, h, color);
        }
    }
}
