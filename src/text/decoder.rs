// src/text/decoder.rs

//! Stateless UTF-8 to code point decoding for text drawing.
//!
//! Decoding stops at the end of input or at a NUL byte. Malformed input never
//! stops it: each bad sequence yields U+FFFD and decoding resumes at the next
//! byte that could start a character.

use log::trace;

pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

const UTF8_ASCII_MAX: u8 = 0x7F;
const UTF8_CONT_MIN: u8 = 0x80; // Start of continuation byte range
const UTF8_CONT_MAX: u8 = 0xBF; // End of continuation byte range
const UTF8_2_BYTE_MIN: u8 = 0xC2; // Excludes overlong 0xC0, 0xC1
const UTF8_3_BYTE_MIN: u8 = 0xE0;
const UTF8_4_BYTE_MIN: u8 = 0xF0;
const UTF8_4_BYTE_MAX: u8 = 0xF4; // Max valid start for 4-byte sequence (RFC 3629)

/// Decodes the code point at the start of `bytes`.
///
/// Returns the code point and the number of bytes it used, or `None` at the
/// end of input or a NUL terminator.
pub fn next_codepoint(bytes: &[u8]) -> Option<(u32, usize)> {
    let &lead = bytes.first()?;
    let expected = match lead {
        0x00 => return None,
        0x01..=UTF8_ASCII_MAX => return Some((u32::from(lead), 1)),
        UTF8_2_BYTE_MIN..=0xDF => 2,
        UTF8_3_BYTE_MIN..=0xEF => 3,
        UTF8_4_BYTE_MIN..=UTF8_4_BYTE_MAX => 4,
        // 0x80-0xC1 (continuation / overlong lead) and 0xF5-0xFF
        _ => {
            trace!("invalid utf8 lead byte: {:X?}", lead);
            return Some((REPLACEMENT_CHARACTER, 1));
        }
    };

    let mut len = 1;
    while len < expected {
        match bytes.get(len) {
            Some(b) if (UTF8_CONT_MIN..=UTF8_CONT_MAX).contains(b) => len += 1,
            _ => {
                trace!("truncated utf8 sequence: {:X?}", &bytes[..len]);
                return Some((REPLACEMENT_CHARACTER, len));
            }
        }
    }

    // Rejects overlong forms, surrogates and values past U+10FFFF.
    let decoded = std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next());
    match decoded {
        Some(c) => Some((u32::from(c), len)),
        None => {
            trace!("invalid utf8 sequence: {:X?}", &bytes[..len]);
            Some((REPLACEMENT_CHARACTER, len))
        }
    }
}

/// Iterator over the code points of a byte string.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    rest: &'a [u8],
}

impl<'a> Codepoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// Bytes not yet decoded.
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let (codepoint, used) = next_codepoint(self.rest)?;
        self.rest = &self.rest[used..];
        Some(codepoint)
    }
}
