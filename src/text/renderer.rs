// src/text/renderer.rs

//! Glyph placement, blending and measurement.
//!
//! `write` and `measure` walk a string the same way: decode a code point,
//! resolve it (with fallback), place the glyph relative to the cursor, then
//! advance. Both use [`glyph_rect`] for placement, so a measured box always
//! covers what a draw at the same origin touches.

use log::{trace, warn};

use super::decoder::Codepoints;
use crate::color::{blend, FontProperties};
use crate::error::FontError;
use crate::font::bitmap::coverage;
use crate::font::{BitDepth, FontStore, Glyph, Inflate};
use crate::framebuffer::FrameBuffer;

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left
            && y >= top
            && x < left + i64::from(self.width)
            && y < top + i64::from(self.height)
    }
}

/// Outcome of drawing one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Glyphs whose bitmaps were produced and drawn (clipped or not).
    pub drawn: usize,
    /// Characters with no glyph and no fallback glyph.
    pub missing: usize,
    /// Glyphs whose bitmaps could not be produced.
    pub failed: usize,
    /// Cursor position after the last character.
    pub cursor_x: i32,
}

/// Destination rectangle `(x, y, w, h)` of `glyph` drawn at the cursor.
///
/// `top` is measured from the baseline up to the bitmap's top edge.
pub fn glyph_rect(cursor_x: i64, cursor_y: i64, glyph: &Glyph) -> (i64, i64, i64, i64) {
    let height = i64::from(glyph.height);
    (
        cursor_x + i64::from(glyph.left),
        cursor_y - i64::from(glyph.top) + height,
        i64::from(glyph.width),
        height,
    )
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Draws `text` with the cursor starting at `(x, y)`.
    ///
    /// Characters the font lacks use the store's fallback code point, or are
    /// skipped without moving the cursor if that is missing too. A glyph whose
    /// bitmap can't be produced is skipped, but the cursor still advances.
    pub fn write<I, T>(
        &mut self,
        fonts: &mut FontStore<'_, I>,
        text: &T,
        x: i32,
        y: i32,
        props: &FontProperties,
    ) -> Result<TextStats, FontError>
    where
        I: Inflate,
        T: AsRef<[u8]> + ?Sized,
    {
        let depth = fonts.font()?.bit_depth();
        let mut stats = TextStats::default();
        let mut cursor_x = i64::from(x);
        let cursor_y = i64::from(y);

        for codepoint in Codepoints::new(text.as_ref()) {
            let Some(glyph) = fonts.resolve_or_fallback(codepoint).copied() else {
                warn!("write: no glyph for U+{:04X} and no fallback glyph", codepoint);
                stats.missing += 1;
                continue;
            };

            match fonts.materialize(&glyph) {
                Ok(bitmap) => {
                    self.draw_glyph(&glyph, &bitmap, depth, cursor_x, cursor_y, props);
                    stats.drawn += 1;
                }
                Err(err) => {
                    warn!("write: skipping glyph for U+{:04X}: {}", codepoint, err);
                    stats.failed += 1;
                }
            }
            cursor_x += i64::from(glyph.x_advance);
        }

        stats.cursor_x = saturate(cursor_x);
        Ok(stats)
    }

    fn draw_glyph(
        &mut self,
        glyph: &Glyph,
        bitmap: &[u8],
        depth: BitDepth,
        cursor_x: i64,
        cursor_y: i64,
        props: &FontProperties,
    ) {
        let (gx, gy, w, h) = glyph_rect(cursor_x, cursor_y, glyph);
        let Some((x0, y0, cw, ch)) = self.clip(gx, gy, w, h) else {
            trace!("draw_glyph: {}x{} at ({}, {}) fully clipped", w, h, gx, gy);
            return;
        };

        let format = self.format();
        let max = depth.max_coverage();
        for dy in y0..y0 + ch {
            let local_y = (dy as i64 - gy) as usize;
            for dx in x0..x0 + cw {
                let local_x = (dx as i64 - gx) as usize;
                let alpha = coverage(bitmap, glyph, depth, local_x, local_y);
                self.put(dx, dy, blend(format, props, alpha, max));
            }
        }
    }
}

impl<I: Inflate> FontStore<'_, I> {
    /// Bounding box of everything `write` would draw for `text` at `(x, y)`,
    /// or `None` if no glyph has any pixels.
    pub fn bounds<T>(&self, text: &T, x: i32, y: i32) -> Result<Option<Rect>, FontError>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        self.font()?;
        let mut cursor_x = i64::from(x);
        let cursor_y = i64::from(y);
        let mut union: Option<(i64, i64, i64, i64)> = None;

        for codepoint in Codepoints::new(text.as_ref()) {
            let Some(glyph) = self.resolve_or_fallback(codepoint) else {
                continue;
            };
            let (gx, gy, w, h) = glyph_rect(cursor_x, cursor_y, glyph);
            if w > 0 && h > 0 {
                let (x1, y1) = (gx + w, gy + h);
                union = Some(match union {
                    None => (gx, gy, x1, y1),
                    Some((ux0, uy0, ux1, uy1)) => {
                        (ux0.min(gx), uy0.min(gy), ux1.max(x1), uy1.max(y1))
                    }
                });
            }
            cursor_x += i64::from(glyph.x_advance);
        }

        Ok(union.map(|(x0, y0, x1, y1)| Rect {
            x: saturate(x0),
            y: saturate(y0),
            width: (x1 - x0).clamp(0, i64::from(u32::MAX)) as u32,
            height: (y1 - y0).clamp(0, i64::from(u32::MAX)) as u32,
        }))
    }

    /// Width and height of the box [`FontStore::bounds`] reports.
    pub fn measure<T>(&self, text: &T) -> Result<(u32, u32), FontError>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        Ok(self
            .bounds(text, 0, 0)?
            .map_or((0, 0), |rect| (rect.width, rect.height)))
    }
}
