//! Mapping between byte offsets and screen columns.

use crate::engine::Engine;
use crate::unicode::{Encoding, display_width_char};

impl Engine {
    /// Add the width of the character at the start of `bytes` to `column`
    /// and return its length in bytes.
    ///
    /// Tabs run to the next tab stop, control characters take two columns
    /// (caret notation), then the width table decides. An invalid sequence
    /// is one byte wide and one column wide. An empty slice returns 0.
    pub fn advance_over(&self, bytes: &[u8], column: &mut usize) -> usize {
        let Some(&first) = bytes.first() else {
            return 0;
        };

        if first >= 0x80 && self.encoding() == Encoding::Utf8 {
            // A C1 control takes two bytes and two columns.
            if first == 0xC2 && bytes.get(1).is_some_and(|&b| b < 0xA0) {
                *column += 2;
                return 2;
            }
            let cls = self.classifier();
            return match cls.decode(bytes) {
                Some((c, len)) => {
                    *column += display_width_char(c, cls.width_method(), cls.high_plane());
                    len
                }
                None => {
                    *column += 1;
                    1
                }
            };
        }

        if first < 0x20 {
            if first == b'\t' {
                *column += self.tab_size() - *column % self.tab_size();
            } else {
                *column += 2;
            }
        } else if (0x7F..0xA0).contains(&first) {
            *column += 2;
        } else {
            *column += 1;
        }
        1
    }

    /// Byte offset of the character that occupies `column` in `buf`, or the
    /// length of `buf` when the line is narrower than that.
    #[must_use]
    pub fn actual_x(&self, buf: &[u8], column: usize) -> usize {
        let mut width = 0;
        let mut x = 0;
        while x < buf.len() {
            let charlen = self.advance_over(&buf[x..], &mut width);
            if width > column {
                break;
            }
            x += charlen;
        }
        x
    }

    /// Width in columns of the first `x` bytes of `buf`.
    ///
    /// When `x` falls inside a character, that whole character is counted.
    #[must_use]
    pub fn wideness(&self, buf: &[u8], x: usize) -> usize {
        let mut width = 0;
        let mut remaining = x;
        let mut idx = 0;
        while remaining > 0 && idx < buf.len() {
            let charlen = self.advance_over(&buf[idx..], &mut width);
            if remaining <= charlen {
                break;
            }
            remaining -= charlen;
            idx += charlen;
        }
        width
    }

    /// Total width in columns of `buf`.
    #[must_use]
    pub fn breadth(&self, buf: &[u8]) -> usize {
        let mut width = 0;
        let mut idx = 0;
        while idx < buf.len() {
            idx += self.advance_over(&buf[idx..], &mut width);
        }
        width
    }

    /// The printable text for the `span` columns of `buf` starting at
    /// column `leftedge`.
    ///
    /// Tabs become spaces, control characters become `^X`, invalid bytes
    /// become U+FFFD. A character that starts before `leftedge` but reaches
    /// into the row is shown as spaces; a wide character that would cross
    /// the right edge is left out.
    #[must_use]
    pub fn display_row(&self, buf: &[u8], leftedge: usize, span: usize) -> String {
        let cls = self.classifier();
        let limit = leftedge + span;
        let mut out = String::with_capacity(span);
        let mut column = 0;
        let mut x = 0;

        while x < buf.len() && column < leftedge {
            let start = column;
            x += self.advance_over(&buf[x..], &mut column);
            if column > leftedge && start < leftedge {
                let visible = column.min(limit) - leftedge;
                out.extend(std::iter::repeat_n(' ', visible));
            }
        }

        while x < buf.len() && column < limit {
            let bytes = &buf[x..];
            let start = column;
            let charlen = self.advance_over(bytes, &mut column);
            if column > limit && buf[x] != b'\t' {
                break;
            }
            let shown = column.min(limit) - start;

            if buf[x] == b'\t' {
                out.extend(std::iter::repeat_n(' ', shown));
            } else if cls.is_control(bytes) {
                out.push('^');
                out.push(cls.control_rep(bytes));
            } else {
                // Raw high bytes decode as Latin-1.
                match cls.decode(bytes) {
                    Some((c, _)) => out.push(c),
                    None => out.push(char::REPLACEMENT_CHARACTER),
                }
            }
            x += charlen;
        }
        out
    }
}
