// src/text/builtin.rs

//! The fixed 8x8 ASCII font every surface can draw without loading anything.

use font8x8::legacy::BASIC_LEGACY;

use crate::framebuffer::FrameBuffer;

/// Width and height of a built-in glyph, which is also the cursor advance.
pub const BUILTIN_GLYPH_SIZE: i32 = 8;

/// Glyph drawn for bytes outside printable ASCII.
const SUBSTITUTE: u8 = 0x7F;

fn builtin_glyph(byte: u8) -> [u8; 8] {
    let index = if (0x20..=0x7F).contains(&byte) {
        byte
    } else {
        SUBSTITUTE
    };
    BASIC_LEGACY[usize::from(index)]
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Draws `text` in the built-in 8x8 font with its top-left corner at
    /// `(x, y)`, setting glyph pixels to `color` and leaving the rest alone.
    ///
    /// Works byte by byte and stops at a NUL. Bytes outside printable ASCII
    /// draw the substitute glyph. Returns the cursor position after the last
    /// glyph.
    pub fn text<T>(&mut self, text: &T, x: i32, y: i32, color: u32) -> i32
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let (mut cursor_x, y) = (i64::from(x), i64::from(y));
        for &byte in text.as_ref().iter().take_while(|&&b| b != 0) {
            let glyph = builtin_glyph(byte);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) != 0 {
                        self.plot(cursor_x + col, y + row as i64, color);
                    }
                }
            }
            cursor_x += i64::from(BUILTIN_GLYPH_SIZE);
        }
        cursor_x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}
