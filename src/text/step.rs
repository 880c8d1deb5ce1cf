//! Moving a byte offset one character at a time.
//!
//! UTF-8 only synchronises forwards, so stepping left probes back for a
//! starter byte and then re-walks forwards to confirm where the previous
//! character really begins. Corrupt sequences degrade to single-byte steps.

use crate::engine::Engine;
use crate::unicode::Encoding;

/// Maximum length of a UTF-8 sequence.
const MAX_CHAR_LEN: usize = 4;

#[inline]
fn is_starter(byte: u8) -> bool {
    (byte & 0xC0) != 0x80
}

/// The bytes from `x` to the end of `buf` (empty when `x` is past the end).
#[inline]
#[must_use]
pub fn tail(buf: &[u8], x: usize) -> &[u8] {
    buf.get(x..).unwrap_or(&[])
}

impl Engine {
    /// Start offset of the character before `x`. Returns 0 at offset 0.
    #[must_use]
    pub fn step_left(&self, buf: &[u8], x: usize) -> usize {
        let x = x.min(buf.len());
        if x == 0 {
            return 0;
        }
        if self.encoding() == Encoding::Raw {
            return x - 1;
        }

        let mut before = if x < MAX_CHAR_LEN {
            0
        } else {
            (1..=MAX_CHAR_LEN)
                .map(|back| x - back)
                .find(|&idx| is_starter(buf[idx]))
                .unwrap_or(x - 1)
        };

        let mut charlen = 0;
        while before < x {
            charlen = self.encoding().char_length(&buf[before..]);
            before += charlen;
        }
        before - charlen
    }

    /// Offset just past the character at `x`. A no-op at the end of `buf`.
    #[must_use]
    pub fn step_right(&self, buf: &[u8], x: usize) -> usize {
        if x >= buf.len() {
            return buf.len();
        }
        x + self.encoding().char_length(&buf[x..])
    }

    /// Step left, then keep stepping over zero-width characters so the
    /// cursor never rests on a combining mark.
    #[must_use]
    pub fn visual_step_left(&self, buf: &[u8], x: usize) -> usize {
        let mut x = self.step_left(buf, x);
        while x > 0 && self.classifier().is_zero_width(tail(buf, x)) {
            x = self.step_left(buf, x);
        }
        x
    }

    /// Step right, then past any zero-width characters that follow.
    #[must_use]
    pub fn visual_step_right(&self, buf: &[u8], x: usize) -> usize {
        let mut x = self.step_right(buf, x);
        while x < buf.len() && self.classifier().is_zero_width(&buf[x..]) {
            x = self.step_right(buf, x);
        }
        x
    }

    /// Whether `x` is an offset that forward scanning from 0 lands on.
    #[must_use]
    pub fn is_char_boundary(&self, buf: &[u8], x: usize) -> bool {
        if x == 0 || x == buf.len() {
            return true;
        }
        if x > buf.len() {
            return false;
        }
        self.step_right(buf, self.step_left(buf, x)) == x
    }
}
