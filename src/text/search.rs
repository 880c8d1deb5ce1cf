//! Literal search and bracket matching.

use crate::logging::{LogLevel, log_at};
use crate::text::editor::Editor;
use crate::text::viewport::ScrollManner;
use crate::unicode::bracket_match;

impl Editor {
    /// First match of `needle` on line `idx` starting at or after `from`
    /// and no later than `until`.
    fn match_on_line(
        &self,
        idx: usize,
        needle: &[u8],
        whole_words: bool,
        from: usize,
        until: usize,
    ) -> Option<usize> {
        let text = self.doc.text(idx);
        if from > text.len() || needle.len() > text.len() - from {
            return None;
        }
        let last = (text.len() - needle.len()).min(until);
        (from..=last).find(|&x| {
            text[x..].starts_with(needle)
                && self.engine.is_char_boundary(text, x)
                && (!whole_words || self.engine.is_separate_word(x, needle.len(), text))
        })
    }

    /// Search forward for `needle` starting just after the cursor, wrapping
    /// around at the end of the document.
    ///
    /// With `whole_words` a match only counts when it is a separate word.
    /// On success the cursor moves to the start of the match and `true` is
    /// returned. A match at the cursor itself is found last.
    pub fn find_next(&mut self, needle: &[u8], whole_words: bool) -> bool {
        if needle.is_empty() {
            return false;
        }
        let start_line = self.current;
        let start_x = self.engine.step_right(self.current_text(), self.current_x);
        let count = self.doc.line_count();

        let mut found = None;
        for offset in 0..=count {
            let idx = (start_line + offset) % count;
            let hit = match offset {
                0 => self.match_on_line(idx, needle, whole_words, start_x, usize::MAX),
                n if n == count => self.match_on_line(idx, needle, whole_words, 0, self.current_x),
                _ => self.match_on_line(idx, needle, whole_words, 0, usize::MAX),
            };
            if let Some(x) = hit {
                found = Some((idx, x));
                break;
            }
        }

        let Some((line, x)) = found else {
            log_at!(LogLevel::Debug, "no match for {} byte needle", needle.len());
            return false;
        };
        if line < start_line || (line == start_line && x <= self.current_x) {
            log_at!(LogLevel::Debug, "search wrapped to line {}", line + 1);
        }
        self.current = line;
        self.current_x = x;
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
        true
    }

    /// Jump to the bracket matching the one under the cursor, honoring
    /// nesting. Opening brackets search forward, closing ones backward.
    ///
    /// Returns `false`, leaving the cursor alone, when the cursor is not on
    /// a bracket or the bracket is unmatched.
    pub fn find_bracket(&mut self) -> bool {
        let Some(&here) = self.current_text().get(self.current_x) else {
            return false;
        };
        let Some(wanted) = bracket_match(here) else {
            return false;
        };
        let forward = matches!(here, b'(' | b'[' | b'{');

        let (mut line, mut x) = (self.current, self.current_x);
        let mut depth = 0usize;
        loop {
            if forward {
                x += 1;
                while x >= self.doc.text(line).len() {
                    if line >= self.doc.last_line() {
                        return false;
                    }
                    line += 1;
                    x = 0;
                    if !self.doc.text(line).is_empty() {
                        break;
                    }
                }
            } else {
                while x == 0 {
                    if line == 0 {
                        return false;
                    }
                    line -= 1;
                    x = self.doc.text(line).len();
                }
                x -= 1;
            }

            let byte = self.doc.text(line)[x];
            if byte == here {
                depth += 1;
            } else if byte == wanted {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
        }

        self.current = line;
        self.current_x = x;
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::text::document::Document;
    use crate::text::line::Position;
    use crate::text::viewport::Viewport;
    use std::sync::Arc;

    fn editor(text: &str) -> Editor {
        Editor::new(
            Arc::new(Engine::default()),
            Document::from_bytes(text.as_bytes()),
            Viewport::new(5, 40).unwrap(),
        )
    }

    #[test]
    fn test_find_next_moves_forward_and_wraps() {
        let mut ed = editor("cat dog\nbird cat\ncow");
        assert!(ed.find_next(b"cat", false));
        assert_eq!(ed.cursor(), Position::new(1, 5));
        assert!(ed.find_next(b"cat", false));
        assert_eq!(ed.cursor(), Position::new(0, 0));
        assert!(!ed.find_next(b"horse", false));
        assert_eq!(ed.cursor(), Position::new(0, 0));
        assert!(!ed.find_next(b"", false));
    }

    #[test]
    fn test_find_next_only_occurrence_is_found_again() {
        let mut ed = editor("one cow");
        ed.set_cursor(Position::new(0, 4));
        assert!(ed.find_next(b"cow", false));
        assert_eq!(ed.cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_find_next_whole_words() {
        let mut ed = editor("concat\ncat");
        assert!(ed.find_next(b"cat", false));
        assert_eq!(ed.cursor(), Position::new(0, 3));

        ed.set_cursor(Position::new(0, 0));
        assert!(ed.find_next(b"cat", true));
        assert_eq!(ed.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_find_next_multibyte() {
        let mut ed = editor("日本語 本");
        assert!(ed.find_next("本".as_bytes(), false));
        assert_eq!(ed.cursor(), Position::new(0, 3));
        assert!(ed.find_next("本".as_bytes(), false));
        assert_eq!(ed.cursor(), Position::new(0, 10));
    }

    #[test]
    fn test_find_bracket_nested() {
        let mut ed = editor("f(a, (b)) {\n  x[0]\n}");
        ed.set_cursor(Position::new(0, 1));
        assert!(ed.find_bracket());
        assert_eq!(ed.cursor(), Position::new(0, 8));
        assert!(ed.find_bracket());
        assert_eq!(ed.cursor(), Position::new(0, 1));

        ed.set_cursor(Position::new(0, 10));
        assert!(ed.find_bracket());
        assert_eq!(ed.cursor(), Position::new(2, 0));
        assert!(ed.find_bracket());
        assert_eq!(ed.cursor(), Position::new(0, 10));
    }

    #[test]
    fn test_find_bracket_not_on_bracket_or_unmatched() {
        let mut ed = editor("(abc");
        ed.set_cursor(Position::new(0, 2));
        assert!(!ed.find_bracket());
        ed.set_cursor(Position::new(0, 0));
        assert!(!ed.find_bracket());
        assert_eq!(ed.cursor(), Position::new(0, 0));
    }
}
