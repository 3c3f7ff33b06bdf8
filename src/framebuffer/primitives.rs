// src/framebuffer/primitives.rs

//! Integer line, ellipse and polygon rasterization.
//!
//! Coordinates are widened to `i64` before any arithmetic, and every write
//! goes through the clipped fill or plot paths. The midpoint ellipse terms
//! grow with the cube of the radius, so radii whose terms don't fit in `i64`
//! are skipped; polygon edge intersections are computed in `i128`.

use bitflags::bitflags;
use log::debug;
use serde::{Deserialize, Serialize};

use super::FrameBuffer;

bitflags! {
    /// Quadrants of an ellipse to draw, as seen on screen:
    ///
    /// ```text
    /// Q2 | Q1
    /// ---+---
    /// Q3 | Q4
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Quadrants: u8 {
        const Q1 = 1 << 0; // upper right
        const Q2 = 1 << 1; // upper left
        const Q3 = 1 << 2; // lower left
        const Q4 = 1 << 3; // lower right
        const ALL = Self::Q1.bits() | Self::Q2.bits() | Self::Q3.bits() | Self::Q4.bits();
    }
}

impl Default for Quadrants {
    fn default() -> Self {
        Quadrants::ALL
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Bresenham line from `(x1, y1)` to `(x2, y2)`, both endpoints included.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u32) {
        self.line_wide(x1.into(), y1.into(), x2.into(), y2.into(), color);
    }

    pub(crate) fn line_wide(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: u32) {
        let (mut dx, mut sx) = (x2 - x1, 1);
        if dx <= 0 {
            dx = -dx;
            sx = -1;
        }
        let (mut dy, mut sy) = (y2 - y1, 1);
        if dy <= 0 {
            dy = -dy;
            sy = -1;
        }

        // Walk along the major axis; `steep` remembers that x and y swapped.
        let (mut major, mut minor) = (x1, y1);
        let steep = dy > dx;
        if steep {
            std::mem::swap(&mut major, &mut minor);
            std::mem::swap(&mut dx, &mut dy);
            std::mem::swap(&mut sx, &mut sy);
        }

        let mut e = 2 * dy - dx;
        for _ in 0..dx {
            if steep {
                self.plot(minor, major, color);
            } else {
                self.plot(major, minor, color);
            }
            while e >= 0 {
                minor += sy;
                e -= 2 * dx;
            }
            major += sx;
            e += 2 * dy;
        }

        self.plot(x2, y2, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse_points(
        &mut self,
        cx: i64,
        cy: i64,
        x: i64,
        y: i64,
        color: u32,
        fill: bool,
        q: Quadrants,
    ) {
        if fill {
            if q.contains(Quadrants::Q1) {
                self.fill_rect_wide(cx, cy - y, x + 1, 1, color);
            }
            if q.contains(Quadrants::Q2) {
                self.fill_rect_wide(cx - x, cy - y, x + 1, 1, color);
            }
            if q.contains(Quadrants::Q3) {
                self.fill_rect_wide(cx - x, cy + y, x + 1, 1, color);
            }
            if q.contains(Quadrants::Q4) {
                self.fill_rect_wide(cx, cy + y, x + 1, 1, color);
            }
        } else {
            if q.contains(Quadrants::Q1) {
                self.plot(cx + x, cy - y, color);
            }
            if q.contains(Quadrants::Q2) {
                self.plot(cx - x, cy - y, color);
            }
            if q.contains(Quadrants::Q3) {
                self.plot(cx - x, cy + y, color);
            }
            if q.contains(Quadrants::Q4) {
                self.plot(cx + x, cy + y, color);
            }
        }
    }

    /// Midpoint ellipse centred on `(cx, cy)` with radii `rx`, `ry`.
    ///
    /// With `fill`, each computed point becomes a horizontal span back to the
    /// centre column. Only the selected `quadrants` are drawn. Negative radii
    /// draw nothing, and neither do radii too large for the decision terms
    /// (roughly beyond 800 000 pixels).
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
        color: u32,
        fill: bool,
        quadrants: Quadrants,
    ) {
        if rx < 0 || ry < 0 {
            return;
        }
        let (cx, cy, a, b) = (i64::from(cx), i64::from(cy), i64::from(rx), i64::from(ry));
        if a == 0 && b == 0 {
            self.ellipse_points(cx, cy, 0, 0, color, fill, quadrants);
            return;
        }

        if !midpoint_terms_fit(a, b) {
            debug!("ellipse: radii {}x{} out of range, skipped", a, b);
            return;
        }

        let two_asquare = 2 * a * a;
        let two_bsquare = 2 * b * b;

        // Region 1: slope shallower than -1, stepping y.
        let (mut x, mut y) = (a, 0);
        let mut xchange = b * b * (1 - 2 * a);
        let mut ychange = a * a;
        let mut error = 0;
        let mut stopping_x = two_bsquare * a;
        let mut stopping_y = 0;
        while stopping_x >= stopping_y {
            self.ellipse_points(cx, cy, x, y, color, fill, quadrants);
            y += 1;
            stopping_y += two_asquare;
            error += ychange;
            ychange += two_asquare;
            if 2 * error + xchange > 0 {
                x -= 1;
                stopping_x -= two_bsquare;
                error += xchange;
                xchange += two_bsquare;
            }
        }

        // Region 2: slope steeper than -1, stepping x.
        x = 0;
        y = b;
        xchange = b * b;
        ychange = a * a * (1 - 2 * b);
        error = 0;
        stopping_x = 0;
        stopping_y = two_asquare * b;
        while stopping_x <= stopping_y {
            self.ellipse_points(cx, cy, x, y, color, fill, quadrants);
            x += 1;
            stopping_x += two_bsquare;
            error += xchange;
            xchange += two_bsquare;
            if 2 * error + ychange > 0 {
                y -= 1;
                stopping_y -= two_asquare;
                error += ychange;
                ychange += two_asquare;
            }
        }
    }

    /// Draws a closed polygon whose vertices are offsets from `(x, y)`.
    ///
    /// The outline strokes every edge, including the closing one. The filled
    /// variant is an integer scanline fill: each row collects the x positions
    /// where edges cross it and fills between pairs of them.
    pub fn polygon(&mut self, x: i32, y: i32, vertices: &[(i32, i32)], color: u32, fill: bool) {
        let Some(&first) = vertices.first() else {
            return;
        };
        let (ox, oy) = (i64::from(x), i64::from(y));
        let widen = |(px, py): (i32, i32)| (i64::from(px), i64::from(py));

        if !fill {
            let (mut px1, mut py1) = widen(first);
            for &vertex in vertices.iter().rev() {
                let (px2, py2) = widen(vertex);
                self.line_wide(ox + px1, oy + py1, ox + px2, oy + py2, color);
                (px1, py1) = (px2, py2);
            }
            return;
        }

        let (y_min, y_max) = vertices
            .iter()
            .fold((i64::MAX, i64::MIN), |(lo, hi), &(_, py)| {
                (lo.min(py.into()), hi.max(py.into()))
            });

        // Rows off the surface can only produce clipped writes.
        let first_row = y_min.max(-oy);
        let last_row = y_max.min(self.height as i64 - 1 - oy);

        let mut nodes: Vec<i64> = Vec::with_capacity(vertices.len());
        for row in first_row..=last_row {
            nodes.clear();
            let (mut px1, mut py1) = widen(first);
            for &vertex in vertices.iter().rev() {
                let (px2, py2) = widen(vertex);

                // The lower endpoint of an edge is excluded so shared vertices
                // aren't counted twice; local extrema and horizontal edges get
                // patched up explicitly instead.
                let crosses = (py1 > row && py2 <= row) || (py1 <= row && py2 > row);
                if py1 != py2 && crosses {
                    nodes.push(intersect(px1, py1, px2, py2, row));
                } else if row == py1.max(py2) {
                    if py1 < py2 {
                        self.plot(ox + px2, oy + py2, color);
                    } else if py2 < py1 {
                        self.plot(ox + px1, oy + py1, color);
                    } else {
                        self.line_wide(ox + px1, oy + py1, ox + px2, oy + py2, color);
                    }
                }

                (px1, py1) = (px2, py2);
            }

            nodes.sort_unstable();
            for pair in nodes.chunks_exact(2) {
                self.fill_rect_wide(ox + pair[0], oy + row, pair[1] - pair[0] + 1, 1, color);
            }
        }
    }
}

/// Whether the midpoint ellipse's decision terms for radii `a`, `b` fit in
/// `i64`. They stay below `16 * max(a, b)^3`.
fn midpoint_terms_fit(a: i64, b: i64) -> bool {
    let m = a.max(b);
    m.checked_mul(m)
        .and_then(|v| v.checked_mul(m))
        .and_then(|v| v.checked_mul(16))
        .is_some()
}

/// X where the edge `(px1, py1)-(px2, py2)` crosses `row`, in 1/32 pixel
/// fixed point rounded to the nearest pixel. `py1 != py2`.
fn intersect(px1: i64, py1: i64, px2: i64, py2: i64, row: i64) -> i64 {
    let (px1, py1, px2, py2, row) = (
        i128::from(px1),
        i128::from(py1),
        i128::from(px2),
        i128::from(py2),
        i128::from(row),
    );
    let x = (32 * px1 + 32 * (px2 - px1) * (row - py1) / (py2 - py1) + 16) / 32;
    // Lies between px1 and px2, both of which came from i32.
    x as i64
}
