//! Word boundaries and word-wise cursor motion.

use crate::config::Flags;
use crate::engine::Engine;
use crate::text::editor::Editor;
use crate::text::step::tail;
use crate::text::viewport::ScrollManner;

impl Engine {
    fn is_word_or_underscore(&self, bytes: &[u8], allow_underscore: bool) -> bool {
        self.classifier().is_word_char(bytes, false)
            || (allow_underscore && bytes.first() == Some(&b'_'))
    }

    /// Start of the word that ends at `pos`.
    ///
    /// Scans left from `pos` while the preceding character is a word
    /// character (counting `_` when `allow_underscore` is set). `pos` is
    /// returned unchanged when the preceding character is not part of a word,
    /// or when `pos` sits on a symbol that is not part of a word either.
    #[must_use]
    pub fn word_start_index(&self, buf: &[u8], pos: usize, allow_underscore: bool) -> usize {
        let pos = pos.min(buf.len());
        let here = tail(buf, pos);
        if !here.is_empty()
            && !self.classifier().is_blank(here)
            && !self.is_word_or_underscore(here, allow_underscore)
        {
            return pos;
        }

        let mut start = pos;
        while start > 0 {
            let before = self.step_left(buf, start);
            if !self.is_word_or_underscore(&buf[before..], allow_underscore) {
                break;
            }
            start = before;
        }
        start
    }

    /// End of the word that starts at `pos`: scans right while the
    /// character is a word character. `pos` is returned unchanged when it
    /// is not on a word character.
    #[must_use]
    pub fn word_end_index(&self, buf: &[u8], pos: usize, allow_underscore: bool) -> usize {
        let mut end = pos.min(buf.len());
        while end < buf.len() && self.is_word_or_underscore(&buf[end..], allow_underscore) {
            end = self.step_right(buf, end);
        }
        end
    }

    /// Whether the `length` bytes at `position` in `buf` form a separate
    /// word: neither the character before nor the one after is a word
    /// character.
    #[must_use]
    pub fn is_separate_word(&self, position: usize, length: usize, buf: &[u8]) -> bool {
        let cls = self.classifier();
        let before_ok = position == 0 || {
            let before = self.step_left(buf, position);
            !cls.is_word_char(&buf[before..], false)
        };
        let after = tail(buf, position + length);
        before_ok && (after.is_empty() || !cls.is_word_char(after, false))
    }
}

impl Editor {
    /// Move to the start of the current or previous word, crossing lines.
    ///
    /// With [`Flags::WORD_BOUNDS`] punctuation counts as part of words.
    pub fn prev_word(&mut self) {
        let engine = &self.engine;
        let punct = engine.is_set(Flags::WORD_BOUNDS);
        let mut seen_a_word = false;
        let mut step_forward = false;

        loop {
            if self.current_x == 0 {
                if self.current == 0 {
                    break;
                }
                self.current -= 1;
                self.current_x = self.doc.text(self.current).len();
            }
            let text = self.doc.text(self.current);
            self.current_x = engine.step_left(text, self.current_x);
            let here = &text[self.current_x..];

            if engine.classifier().is_word_char(here, punct) {
                seen_a_word = true;
                if self.current_x == 0 {
                    break;
                }
            } else if engine.classifier().is_zero_width(here) {
                // Marks belong to whatever they follow.
            } else if seen_a_word {
                step_forward = true;
                break;
            }
        }

        if step_forward {
            self.current_x = engine.step_right(self.doc.text(self.current), self.current_x);
        }
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
    }

    /// Move to the start of the next word, or with `after_ends` to the end
    /// of the current or next word. Crosses lines.
    ///
    /// Returns whether the cursor started on a word character.
    pub fn next_word(&mut self, after_ends: bool) -> bool {
        let engine = &self.engine;
        let cls = engine.classifier();
        let punct = engine.is_set(Flags::WORD_BOUNDS);
        let started_on_word = cls.is_word_char(tail(self.current_text(), self.current_x), punct);
        let mut seen_space = !started_on_word;
        let mut seen_word = started_on_word;

        loop {
            let text = self.doc.text(self.current);
            if self.current_x >= text.len() {
                if self.current >= self.doc.last_line() {
                    break;
                }
                self.current += 1;
                self.current_x = 0;
                seen_space = true;
            } else {
                self.current_x = engine.step_right(text, self.current_x);
            }

            let here = tail(self.doc.text(self.current), self.current_x);
            if after_ends {
                if cls.is_word_char(here, punct) {
                    seen_word = true;
                } else if cls.is_zero_width(here) {
                    // Not a separator.
                } else if seen_word {
                    break;
                }
            } else if cls.is_zero_width(here) {
                // Not a separator.
            } else if !cls.is_word_char(here, punct) {
                seen_space = true;
            } else if seen_space {
                break;
            }
        }

        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
        started_on_word
    }
}
