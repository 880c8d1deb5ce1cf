//! UTF-8 codec with explicit overlong and surrogate rejection.
//!
//! Line data is arbitrary bytes: files may contain invalid sequences and the
//! editor must still be able to walk over them. Everything here treats a
//! missing byte past the end of a slice like a NUL terminator, so a sequence
//! truncated by the end of the buffer is simply invalid.

/// How the bytes of a line are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Multibyte UTF-8.
    #[default]
    Utf8,
    /// One byte per character (non-UTF-8 locales).
    Raw,
}

#[inline]
fn byte_at(bytes: &[u8], idx: usize) -> u8 {
    bytes.get(idx).copied().unwrap_or(0)
}

impl Encoding {
    /// Whether this is the multibyte encoding.
    #[must_use]
    pub fn is_utf8(self) -> bool {
        self == Self::Utf8
    }

    /// Decode the character at the start of `bytes`.
    ///
    /// Returns the character and its length in bytes, or `None` when the
    /// sequence is malformed (or `bytes` is empty). In raw mode every byte is
    /// a character, decoded as its Latin-1 value.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<(char, usize)> {
        let &v1 = bytes.first()?;
        if self == Self::Raw || v1 < 0x80 {
            return Some((char::from(v1), 1));
        }

        let v2 = byte_at(bytes, 1) ^ 0x80;
        if v2 > 0x3F || v1 < 0xC2 {
            return None;
        }
        if v1 < 0xE0 {
            let cp = (u32::from(v1 & 0x1F) << 6) | u32::from(v2);
            return char::from_u32(cp).map(|c| (c, 2));
        }

        let v3 = byte_at(bytes, 2) ^ 0x80;
        if v3 > 0x3F {
            return None;
        }
        if v1 < 0xF0 {
            if (v1 > 0xE0 || v2 >= 0x20) && (v1 != 0xED || v2 < 0x20) {
                let cp = (u32::from(v1 & 0x0F) << 12) | (u32::from(v2) << 6) | u32::from(v3);
                return char::from_u32(cp).map(|c| (c, 3));
            }
            return None;
        }

        let v4 = byte_at(bytes, 3) ^ 0x80;
        if v4 > 0x3F || v1 > 0xF4 {
            return None;
        }
        if (v1 > 0xF0 || v2 >= 0x10) && (v1 != 0xF4 || v2 < 0x10) {
            let cp = (u32::from(v1 & 0x07) << 18)
                | (u32::from(v2) << 12)
                | (u32::from(v3) << 6)
                | u32::from(v4);
            return char::from_u32(cp).map(|c| (c, 4));
        }
        None
    }

    /// Length in bytes of the character at the start of `bytes`.
    ///
    /// Malformed sequences count as one byte so that scanning always makes
    /// progress. Only an empty slice yields 0.
    #[must_use]
    pub fn char_length(self, bytes: &[u8]) -> usize {
        let Some(&c1) = bytes.first() else {
            return 0;
        };
        if self == Self::Raw || c1 < 0xC2 {
            return 1;
        }

        let c2 = byte_at(bytes, 1);
        if (c2 ^ 0x80) > 0x3F {
            return 1;
        }
        if c1 < 0xE0 {
            return 2;
        }
        if (byte_at(bytes, 2) ^ 0x80) > 0x3F {
            return 1;
        }
        if c1 < 0xF0 {
            return if (c1 > 0xE0 || c2 >= 0xA0) && (c1 != 0xED || c2 < 0xA0) {
                3
            } else {
                1
            };
        }
        if (byte_at(bytes, 3) ^ 0x80) > 0x3F || c1 > 0xF4 {
            return 1;
        }
        if (c1 > 0xF0 || c2 >= 0x90) && (c1 != 0xF4 || c2 < 0x90) {
            4
        } else {
            1
        }
    }

    /// Encode `codepoint` into `buf`, returning the written bytes.
    ///
    /// Surrogates and codepoints above U+10FFFF (above 0xFF in raw mode)
    /// produce an empty slice: nothing was written.
    pub fn encode(self, codepoint: u32, buf: &mut [u8; 4]) -> &[u8] {
        let len = match self {
            Self::Raw => {
                if let Ok(byte) = u8::try_from(codepoint) {
                    buf[0] = byte;
                    1
                } else {
                    0
                }
            }
            Self::Utf8 => encode_utf8(codepoint, buf),
        };
        &buf[..len]
    }

    /// Number of characters in `bytes`.
    #[must_use]
    pub fn char_count(self, bytes: &[u8]) -> usize {
        if self == Self::Raw {
            return bytes.len();
        }
        let mut count = 0;
        let mut idx = 0;
        while idx < bytes.len() {
            idx += self.char_length(&bytes[idx..]);
            count += 1;
        }
        count
    }

    /// The bytes of the character at the start of `bytes`.
    #[must_use]
    pub fn collect_char(self, bytes: &[u8]) -> &[u8] {
        &bytes[..self.char_length(bytes)]
    }
}

#[allow(clippy::cast_possible_truncation)]
fn encode_utf8(cp: u32, buf: &mut [u8; 4]) -> usize {
    match cp {
        0..=0x7F => {
            buf[0] = cp as u8;
            1
        }
        0x80..=0x7FF => {
            buf[0] = 0xC0 | (cp >> 6) as u8;
            buf[1] = 0x80 | (cp & 0x3F) as u8;
            2
        }
        0xD800..=0xDFFF => 0,
        0x800..=0xFFFF => {
            buf[0] = 0xE0 | (cp >> 12) as u8;
            buf[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[2] = 0x80 | (cp & 0x3F) as u8;
            3
        }
        0x1_0000..=0x10_FFFF => {
            buf[0] = 0xF0 | (cp >> 18) as u8;
            buf[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            buf[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[3] = 0x80 | (cp & 0x3F) as u8;
            4
        }
        _ => 0,
    }
}
