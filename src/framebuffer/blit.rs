// src/framebuffer/blit.rs

//! Surface-to-surface copies and in-place scrolling.

use super::FrameBuffer;

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Copies `src` so that its top-left pixel lands at `(x, y)`.
    ///
    /// The copy is clipped against both surfaces. Source pixels equal to `key`
    /// are skipped. Values are copied as-is, with no conversion between
    /// formats.
    pub fn blit<S: AsRef<[u8]>>(&mut self, src: &FrameBuffer<S>, x: i32, y: i32, key: Option<u32>) {
        self.blit_mapped(src, x, y, key, Some);
    }

    /// Like [`FrameBuffer::blit`], but each source value first indexes row 0
    /// of `palette`; the key is compared against the palette color.
    ///
    /// Source values past the palette's width are treated as transparent.
    pub fn blit_with_palette<S: AsRef<[u8]>, P: AsRef<[u8]>>(
        &mut self,
        src: &FrameBuffer<S>,
        x: i32,
        y: i32,
        key: Option<u32>,
        palette: &FrameBuffer<P>,
    ) {
        self.blit_mapped(src, x, y, key, |index| {
            i32::try_from(index)
                .ok()
                .and_then(|index| palette.pixel(index, 0))
        });
    }

    fn blit_mapped<S, F>(&mut self, src: &FrameBuffer<S>, x: i32, y: i32, key: Option<u32>, map: F)
    where
        S: AsRef<[u8]>,
        F: Fn(u32) -> Option<u32>,
    {
        let (x, y) = (i64::from(x), i64::from(y));
        let (src_w, src_h) = (src.width as i64, src.height as i64);
        if x >= self.width as i64 || y >= self.height as i64 || -x >= src_w || -y >= src_h {
            return;
        }

        let dst_x0 = x.max(0) as usize;
        let dst_y0 = y.max(0) as usize;
        let src_x0 = (-x).max(0) as usize;
        let src_y0 = (-y).max(0) as usize;
        let dst_x1 = (self.width as i64).min(x + src_w) as usize;
        let dst_y1 = (self.height as i64).min(y + src_h) as usize;

        for (sy, dy) in (src_y0..).zip(dst_y0..dst_y1) {
            for (sx, dx) in (src_x0..).zip(dst_x0..dst_x1) {
                let Some(color) = map(src.get(sx, sy)) else {
                    continue;
                };
                if key != Some(color) {
                    self.put(dx, dy, color);
                }
            }
        }
    }

    /// Shifts the contents by `(dx, dy)` pixels in place.
    ///
    /// The area uncovered by the shift keeps its previous contents.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let (width, height) = (self.width as i64, self.height as i64);
        let (xstep, ystep) = (i64::from(dx), i64::from(dy));

        // Walk away from the direction of motion so every source pixel is
        // read before it gets overwritten.
        let (x_start, x_end, x_dir) = if xstep < 0 {
            (0, width + xstep, 1)
        } else {
            (width - 1, xstep - 1, -1)
        };
        if (xstep < 0 && x_end <= 0) || (xstep >= 0 && x_end >= x_start) {
            return;
        }

        let (y_start, y_end, y_dir) = if ystep < 0 {
            (0, height + ystep, 1)
        } else {
            (height - 1, ystep - 1, -1)
        };
        if (ystep < 0 && y_end <= 0) || (ystep >= 0 && y_end >= y_start) {
            return;
        }

        let mut row = y_start;
        while row != y_end {
            let mut col = x_start;
            while col != x_end {
                let color = self.get((col - xstep) as usize, (row - ystep) as usize);
                self.put(col as usize, row as usize, color);
                col += x_dir;
            }
            row += y_dir;
        }
    }
}
