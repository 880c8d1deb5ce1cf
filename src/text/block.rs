//! Line-wise motion: blocks, paragraphs and the ends of the document.
//!
//! A block is a run of non-blank lines sharing one indentation. Moving to
//! the next block from its middle stops at the block's edge; from an edge it
//! skips the run of blank lines and lands on the next content line. When an
//! indentation change ends a block, motion stops on the block's last line,
//! unless the changed line is right next to the starting line, in which
//! case it lands on the changed line.

use crate::engine::Engine;
use crate::text::document::Document;
use crate::text::editor::Editor;
use crate::text::viewport::ScrollManner;

impl Engine {
    /// Length in bytes of the leading blanks of `buf`.
    #[must_use]
    pub fn indent_length(&self, buf: &[u8]) -> usize {
        let mut x = 0;
        while x < buf.len() && self.classifier().is_blank(&buf[x..]) {
            x = self.step_right(buf, x);
        }
        x
    }

    /// Width in columns of the leading blanks of `buf`.
    #[must_use]
    pub fn indent_width(&self, buf: &[u8]) -> usize {
        self.wideness(buf, self.indent_length(buf))
    }

    /// Whether `buf` holds nothing but blanks and carriage returns.
    #[must_use]
    pub fn is_white_line(&self, buf: &[u8]) -> bool {
        let mut x = 0;
        while x < buf.len() {
            if buf[x] != b'\r' && !self.classifier().is_blank(&buf[x..]) {
                return false;
            }
            x = self.step_right(buf, x);
        }
        true
    }

    /// The line that next-block motion from `anchor` lands on.
    #[must_use]
    pub fn next_block_line(&self, doc: &Document, anchor: usize) -> usize {
        let anchor_indent = self.indent_width(doc.text(anchor));
        let mut current = anchor;
        let mut is_white = self.is_white_line(doc.text(current));
        let mut seen_white = is_white;

        while current < doc.last_line() && (!seen_white || is_white) {
            current += 1;
            let text = doc.text(current);
            is_white = self.is_white_line(text);
            if !is_white && !seen_white && self.indent_width(text) != anchor_indent {
                if current != anchor + 1 {
                    current -= 1;
                }
                break;
            }
            seen_white |= is_white;
        }
        current
    }

    /// The line that previous-block motion from `anchor` lands on.
    #[must_use]
    pub fn prev_block_line(&self, doc: &Document, anchor: usize) -> usize {
        let anchor_indent = self.indent_width(doc.text(anchor));
        let mut current = anchor;
        let mut is_text = false;
        let mut seen_text = false;
        let mut crossed_white = false;

        while current > 0 && (!seen_text || is_text) {
            current -= 1;
            let text = doc.text(current);
            is_text = !self.is_white_line(text);
            if is_text && !crossed_white && self.indent_width(text) != anchor_indent {
                if current + 1 != anchor {
                    current += 1;
                }
                return current;
            }
            seen_text |= is_text;
            crossed_white |= !is_text;
        }

        // Step off a blank landing line only when text was passed.
        if seen_text && current < doc.last_line() && self.is_white_line(doc.text(current)) {
            current += 1;
        }
        current
    }

    /// Whether line `idx` begins a paragraph: it has text and is the first
    /// line or follows a blank line.
    fn begins_paragraph(&self, doc: &Document, idx: usize) -> bool {
        idx == 0
            || (!self.is_white_line(doc.text(idx)) && self.is_white_line(doc.text(idx - 1)))
    }

    /// First line of the paragraph before line `from`.
    #[must_use]
    pub fn para_begin_line(&self, doc: &Document, from: usize) -> usize {
        let mut line = from.saturating_sub(1);
        while !self.begins_paragraph(doc, line) {
            line -= 1;
        }
        line
    }

    /// Last line of the first paragraph at or after line `from`.
    #[must_use]
    pub fn para_end_line(&self, doc: &Document, from: usize) -> usize {
        let mut line = from;
        while line < doc.last_line() && self.is_white_line(doc.text(line)) {
            line += 1;
        }
        while line < doc.last_line()
            && !self.is_white_line(doc.text(line + 1))
            && !self.begins_paragraph(doc, line + 1)
        {
            line += 1;
        }
        line
    }
}

impl Editor {
    /// Move to the start of the current or previous block.
    pub fn to_prev_block(&mut self) {
        self.current = self.engine.prev_block_line(&self.doc, self.current);
        self.land_on_line_start(ScrollManner::Centering);
    }

    /// Move to the end of the current block or the start of the next one.
    pub fn to_next_block(&mut self) {
        self.current = self.engine.next_block_line(&self.doc, self.current);
        self.land_on_line_start(ScrollManner::Centering);
    }

    /// Move to the first line of the current or previous paragraph.
    pub fn to_para_begin(&mut self) {
        self.current = self.engine.para_begin_line(&self.doc, self.current);
        self.land_on_line_start(ScrollManner::Centering);
    }

    /// Move just past the end of the current or next paragraph. On the last
    /// line of the document, move to its end instead.
    pub fn to_para_end(&mut self) {
        let last = self.engine.para_end_line(&self.doc, self.current);
        if last < self.doc.last_line() {
            self.current = last + 1;
            self.land_on_line_start(ScrollManner::Centering);
        } else {
            self.current = last;
            self.current_x = self.current_text().len();
            self.update_placewewant();
            self.redraw(ScrollManner::Centering);
        }
    }

    /// Move to the start of the document.
    pub fn to_first_line(&mut self) {
        self.current = 0;
        self.land_on_line_start(ScrollManner::Centering);
    }

    /// Move to the end of the document, putting the last line on the bottom
    /// row when the window has to move.
    pub fn to_last_line(&mut self) {
        self.current = self.doc.last_line();
        self.current_x = self.current_text().len();
        self.update_placewewant();
        if self.is_cursor_offscreen() {
            self.place_cursor_on_row(self.view.rows() - 1);
        }
    }

    fn land_on_line_start(&mut self, manner: ScrollManner) {
        self.current_x = 0;
        self.placewewant = 0;
        self.redraw(manner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::line::Position;
    use crate::text::viewport::Viewport;
    use std::sync::Arc;

    fn doc(lines: &[&str]) -> Document {
        Document::from_bytes(lines.join("\n").as_bytes())
    }

    #[test]
    fn test_indent_and_white_lines() {
        let engine = Engine::default();
        assert_eq!(engine.indent_length(b"  \tx"), 3);
        assert_eq!(engine.indent_width(b"  \tx"), 8);
        assert_eq!(engine.indent_length(b"   "), 3);
        assert!(engine.is_white_line(b""));
        assert!(engine.is_white_line(b" \t\r"));
        assert!(!engine.is_white_line(b"  x"));
    }

    #[test]
    fn test_next_block_skips_blank_run() {
        let engine = Engine::default();
        let doc = doc(&["a", "b", "c", "", "", "d"]);
        assert_eq!(engine.next_block_line(&doc, 0), 5);
        assert_eq!(engine.next_block_line(&doc, 3), 5);
        assert_eq!(engine.next_block_line(&doc, 5), 5);
    }

    #[test]
    fn test_next_block_stops_at_indentation_change() {
        let engine = Engine::default();
        let doc = doc(&["a", "b", "    c", "    d"]);
        // Not adjacent: stop on the last line of the block.
        assert_eq!(engine.next_block_line(&doc, 0), 1);
        // Adjacent: land on the changed line.
        assert_eq!(engine.next_block_line(&doc, 1), 2);
    }

    #[test]
    fn test_prev_block() {
        let engine = Engine::default();
        let doc = doc(&["a", "b", "", "c", "d"]);
        assert_eq!(engine.prev_block_line(&doc, 4), 3);
        assert_eq!(engine.prev_block_line(&doc, 3), 0);
        assert_eq!(engine.prev_block_line(&doc, 0), 0);
    }

    #[test]
    fn test_prev_block_over_leading_blanks_reaches_top() {
        let engine = Engine::default();
        let doc = doc(&["", "", "x"]);
        assert_eq!(engine.prev_block_line(&doc, 2), 0);
        assert_eq!(engine.prev_block_line(&doc, 1), 0);

        let doc = self::doc(&["a", "", "", "x"]);
        assert_eq!(engine.prev_block_line(&doc, 3), 0);
    }

    #[test]
    fn test_prev_block_stops_at_indentation_change() {
        let engine = Engine::default();
        let doc = doc(&["a", "  b", "  c"]);
        assert_eq!(engine.prev_block_line(&doc, 2), 1);
        assert_eq!(engine.prev_block_line(&doc, 1), 0);
    }

    #[test]
    fn test_paragraphs() {
        let engine = Engine::default();
        let doc = doc(&["one", "two", "", "three", "four", "", ""]);
        assert_eq!(engine.para_begin_line(&doc, 4), 3);
        assert_eq!(engine.para_begin_line(&doc, 3), 0);
        assert_eq!(engine.para_begin_line(&doc, 0), 0);
        assert_eq!(engine.para_end_line(&doc, 0), 1);
        assert_eq!(engine.para_end_line(&doc, 2), 4);
    }

    fn editor(lines: &[&str]) -> Editor {
        Editor::new(
            Arc::new(Engine::default()),
            doc(lines),
            Viewport::new(10, 40).unwrap(),
        )
    }

    #[test]
    fn test_block_motion_resets_column() {
        let mut ed = editor(&["abc", "def", "", "ghi", "jkl"]);
        ed.set_cursor(Position::new(0, 2));
        ed.to_next_block();
        assert_eq!(ed.cursor(), Position::new(3, 0));
        assert_eq!(ed.placewewant(), 0);

        ed.set_cursor(Position::new(4, 1));
        ed.to_prev_block();
        assert_eq!(ed.cursor(), Position::new(3, 0));
        ed.to_prev_block();
        assert_eq!(ed.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_para_end_on_last_line() {
        let mut ed = editor(&["one", "", "two"]);
        ed.to_para_end();
        assert_eq!(ed.cursor(), Position::new(1, 0));
        ed.to_para_end();
        assert_eq!(ed.cursor(), Position::new(2, 3));
    }

    #[test]
    fn test_first_and_last_line() {
        let mut ed = editor(&["one", "two", "three"]);
        ed.to_last_line();
        assert_eq!(ed.cursor(), Position::new(2, 5));
        ed.to_first_line();
        assert_eq!(ed.cursor(), Position::new(0, 0));
    }
}
