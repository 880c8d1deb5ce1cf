//! Cursor motion: left/right, home/end, up/down and page up/down.
//!
//! Vertical motion works in rows. Under soft-wrap a row is a chunk, so
//! moving down from the first chunk of a long line stays on that line. The
//! desired column (`placewewant`) survives moves over shorter lines, and a
//! target column that lands inside a tab spanning two rows is nudged so the
//! cursor neither skips nor repeats a row.

use crate::config::Flags;
use crate::logging::{LogLevel, log_at};
use crate::text::editor::Editor;
use crate::text::viewport::{ScrollDirection, ScrollManner};

impl Editor {
    /// The leftedge of the cursor's chunk and the target column within it.
    fn edge_and_target(&self) -> (usize, usize) {
        if self.engine.is_set(Flags::SOFTWRAP) {
            let cols = self.view.cols();
            let shim = cols * (1 + self.engine.tab_size() / cols);
            let leftedge = self.cursor_leftedge();
            (leftedge, (self.placewewant + shim - leftedge) % cols)
        } else {
            (0, self.placewewant)
        }
    }

    /// Byte offset on the cursor line for `column`, stepping past a tab
    /// when landing on it would move the cursor onto the wrong row.
    /// Updates `leftedge` to the chunk the offset is in.
    fn proper_x(&self, leftedge: &mut usize, forward: bool, column: usize) -> (usize, bool) {
        let engine = &self.engine;
        let text = self.current_text();
        let mut index = engine.actual_x(text, column);
        let mut shifted = false;

        if engine.is_set(Flags::SOFTWRAP) && text.get(index) == Some(&b'\t') {
            let tab = engine.tab_size();
            let cols = self.view.cols();
            let onto_previous_row = forward && engine.wideness(text, index) < *leftedge;
            let onto_next_row = !forward
                && leftedge
                    .checked_sub(1)
                    .is_some_and(|edge| column / tab == edge / tab)
                && column / tab < (*leftedge + cols - 1) / tab;
            if onto_previous_row || onto_next_row {
                index += 1;
                shifted = true;
            }
        }

        if engine.is_set(Flags::SOFTWRAP) {
            *leftedge = engine.leftedge_for(text, engine.wideness(text, index), self.view.cols());
        }
        (index, shifted)
    }

    /// The column for `column` within the chunk at `leftedge`, clamped to
    /// the last column of that chunk.
    fn actual_last_column(&self, leftedge: usize, column: usize) -> usize {
        if !self.engine.is_set(Flags::SOFTWRAP) {
            return leftedge + column;
        }
        let brk = self
            .engine
            .softwrap_breakpoint(self.current_text(), leftedge, self.view.cols());
        let mut end_col = brk.column.saturating_sub(leftedge);
        // Off the last chunk the break column is one past the row.
        if !brk.end_of_line {
            end_col = end_col.saturating_sub(1);
        }
        leftedge + column.min(end_col)
    }

    fn set_proper_index_and_pww(&mut self, leftedge: &mut usize, target: usize, forward: bool) {
        let was_edge = *leftedge;
        let (index, shifted) =
            self.proper_x(leftedge, forward, self.actual_last_column(*leftedge, target));
        self.current_x = index;

        if shifted || *leftedge < was_edge {
            let (index, _) =
                self.proper_x(leftedge, forward, self.actual_last_column(*leftedge, target));
            self.current_x = index;
        }
        self.placewewant = *leftedge + target;
    }

    fn scrolls_by_one_row(&self) -> bool {
        !self.engine.is_set(Flags::JUMPY_SCROLLING)
            && (self.engine.tab_size() < self.view.cols() || !self.engine.is_set(Flags::SOFTWRAP))
    }

    /// Move up one row. Returns `false` at the top of the document.
    pub fn move_up(&mut self) -> bool {
        let (mut leftedge, target) = self.edge_and_target();
        let row = self.cursor_row();
        let cols = self.view.cols();

        if self
            .engine
            .go_back_chunks(&self.doc, 1, &mut self.current, &mut leftedge, cols)
            > 0
        {
            log_at!(LogLevel::Debug, "move up blocked at top of document");
            return false;
        }
        self.set_proper_index_and_pww(&mut leftedge, target, false);

        if row == Some(0) && self.scrolls_by_one_row() {
            self.scroll(ScrollDirection::Backward);
        } else {
            self.redraw(ScrollManner::Flowing);
        }
        self.placewewant = leftedge + target;
        true
    }

    /// Move down one row. Returns `false` at the bottom of the document.
    pub fn move_down(&mut self) -> bool {
        let (mut leftedge, target) = self.edge_and_target();
        let row = self.cursor_row();
        let cols = self.view.cols();

        if self
            .engine
            .go_forward_chunks(&self.doc, 1, &mut self.current, &mut leftedge, cols)
            > 0
        {
            log_at!(LogLevel::Debug, "move down blocked at bottom of document");
            return false;
        }
        self.set_proper_index_and_pww(&mut leftedge, target, true);

        if row == Some(self.view.rows() - 1) && self.scrolls_by_one_row() {
            self.scroll(ScrollDirection::Forward);
        } else {
            self.redraw(ScrollManner::Flowing);
        }
        self.placewewant = leftedge + target;
        true
    }

    /// Rows moved by page up/down: the window height less two rows of
    /// overlap, at least one.
    fn page_rows(&self) -> usize {
        let rows = self.view.rows();
        if rows < 3 { 1 } else { rows - 2 }
    }

    /// Start of a page motion: the chunk, target column and window row the
    /// motion departs from.
    fn page_origin(&mut self) -> (usize, usize, usize) {
        if self.engine.is_set(Flags::JUMPY_SCROLLING) {
            self.current = self.view.edittop();
            (self.view.firstcolumn(), 0, 0)
        } else {
            let (leftedge, target) = self.edge_and_target();
            let row = self.cursor_row().unwrap_or(0).min(self.view.rows() - 1);
            (leftedge, target, row)
        }
    }

    /// Move up almost a screenful, keeping the cursor on its window row.
    /// Near the top, go to the first line.
    pub fn page_up(&mut self) {
        let mustmove = self.page_rows();
        let (mut leftedge, target, row) = self.page_origin();
        let cols = self.view.cols();

        if self
            .engine
            .go_back_chunks(&self.doc, mustmove, &mut self.current, &mut leftedge, cols)
            > 0
        {
            self.to_first_line();
            return;
        }
        self.set_proper_index_and_pww(&mut leftedge, target, false);
        self.place_cursor_on_row(row);
    }

    /// Move down almost a screenful, keeping the cursor on its window row.
    /// Near the bottom, go to the last line.
    pub fn page_down(&mut self) {
        let mustmove = self.page_rows();
        let (mut leftedge, target, row) = self.page_origin();
        let cols = self.view.cols();

        if self
            .engine
            .go_forward_chunks(&self.doc, mustmove, &mut self.current, &mut leftedge, cols)
            > 0
        {
            self.to_last_line();
            return;
        }
        self.set_proper_index_and_pww(&mut leftedge, target, true);
        self.place_cursor_on_row(row);
    }

    /// Move one character left, onto the end of the previous line at the
    /// start of a line. Combining marks are stepped over.
    pub fn move_left(&mut self) {
        if self.current_x > 0 {
            self.current_x = self.engine.visual_step_left(self.current_text(), self.current_x);
        } else if self.current > 0 {
            self.current -= 1;
            self.current_x = self.current_text().len();
        }
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
    }

    /// Move one character right, onto the start of the next line at the
    /// end of a line. Combining marks are stepped over.
    pub fn move_right(&mut self) {
        if self.current_x < self.current_text().len() {
            self.current_x = self
                .engine
                .visual_step_right(self.current_text(), self.current_x);
        } else if self.current < self.doc.last_line() {
            self.current += 1;
            self.current_x = 0;
        }
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
    }

    /// Move to the start of the line.
    ///
    /// With [`Flags::SMART_HOME`] the first stop is the first non-blank
    /// character, and only a second press goes to column zero. Under
    /// soft-wrap the first stop is the start of the cursor's row.
    pub fn move_home(&mut self) {
        let softwrap = self.engine.is_set(Flags::SOFTWRAP);
        let mut leftedge = 0;
        let mut left_x = 0;
        if softwrap {
            leftedge = self.cursor_leftedge();
            let column = leftedge;
            left_x = self.proper_x(&mut leftedge, false, column).0;
        }

        let mut moved = false;
        if self.engine.is_set(Flags::SMART_HOME) {
            let text = self.current_text();
            let indent_x = self.engine.indent_length(text);
            if indent_x < text.len() {
                if self.current_x == indent_x {
                    self.current_x = 0;
                    moved = true;
                } else if left_x <= indent_x {
                    self.current_x = indent_x;
                    moved = true;
                }
            }
        }

        let mut moved_off_chunk = true;
        if !moved && softwrap {
            if self.current_x == left_x {
                self.current_x = 0;
            } else {
                self.current_x = left_x;
                self.placewewant = leftedge;
                moved_off_chunk = false;
            }
        } else if !moved {
            self.current_x = 0;
        }

        if moved_off_chunk {
            self.update_placewewant();
        }
        self.redraw(ScrollManner::Flowing);
    }

    /// Move to the end of the line. Under soft-wrap the first stop is the
    /// end of the cursor's row.
    pub fn move_end(&mut self) {
        let line_len = self.current_text().len();
        let mut moved_off_chunk = true;

        if self.engine.is_set(Flags::SOFTWRAP) {
            let leftedge = self.cursor_leftedge();
            let brk = self
                .engine
                .softwrap_breakpoint(self.current_text(), leftedge, self.view.cols());
            let mut rightedge = brk.column;
            // Off the last chunk the break column is one past the row.
            if !brk.end_of_line {
                rightedge = rightedge.saturating_sub(1);
            }
            let right_x = self.engine.actual_x(self.current_text(), rightedge);

            if self.current_x == right_x {
                self.current_x = line_len;
            } else {
                self.current_x = right_x;
                self.placewewant = rightedge;
                moved_off_chunk = false;
            }
        } else {
            self.current_x = line_len;
        }

        if moved_off_chunk {
            self.update_placewewant();
        }
        self.redraw(ScrollManner::Flowing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::engine::Engine;
    use crate::text::document::Document;
    use crate::text::editor::MotionState;
    use crate::text::line::Position;
    use crate::text::viewport::Viewport;
    use std::sync::Arc;

    fn editor(text: &str, rows: usize, cols: usize, flags: Flags) -> Editor {
        let engine = Engine::new(Options::default().with_flags(flags)).unwrap();
        Editor::new(
            Arc::new(engine),
            Document::from_bytes(text.as_bytes()),
            Viewport::new(rows, cols).unwrap(),
        )
    }

    fn numbered(count: usize) -> String {
        let lines: Vec<String> = (0..count).map(|n| format!("line {n}")).collect();
        lines.join("\n")
    }

    #[test]
    fn test_vertical_motion_keeps_desired_column() {
        let mut ed = editor("abcdef\nab\nabcdef", 10, 40, Flags::empty());
        ed.set_cursor(Position::new(0, 5));
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(1, 2));
        assert_eq!(ed.placewewant(), 5);
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(2, 5));
        assert!(!ed.move_down());
        assert_eq!(ed.motion_state(), MotionState::AtBottom);
    }

    #[test]
    fn test_move_up_at_top_is_noop() {
        let mut ed = editor("one\ntwo", 10, 40, Flags::empty());
        ed.set_cursor(Position::new(0, 2));
        assert_eq!(ed.motion_state(), MotionState::AtTop);
        assert!(!ed.move_up());
        assert_eq!(ed.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_vertical_motion_onto_tab() {
        let mut ed = editor("abcdefghij\n\tx", 10, 40, Flags::empty());
        ed.set_cursor(Position::new(0, 4));
        ed.move_down();
        assert_eq!(ed.cursor(), Position::new(1, 0));
        ed.move_up();
        assert_eq!(ed.cursor(), Position::new(0, 4));
    }

    /// Row of the cursor counted from the top of the document.
    fn absolute_row(ed: &Editor) -> usize {
        let engine = ed.engine();
        let cols = ed.viewport().cols();
        let above: usize = (0..ed.cursor().line)
            .map(|idx| engine.extra_chunks_in(ed.document().text(idx), cols) + 1)
            .sum();
        above + engine.chunk_for(ed.current_text(), ed.xplustabs(), cols)
    }

    #[test]
    fn test_move_down_steps_past_tab_started_on_previous_row() {
        let engine = Engine::new(
            Options::default()
                .with_tab_size(4)
                .with_flags(Flags::SOFTWRAP),
        )
        .unwrap();
        let mut ed = Editor::new(
            Arc::new(engine),
            Document::from_bytes(b"abcd\tx"),
            Viewport::new(10, 5).unwrap(),
        );
        // The tab spans columns 4..8 and the second row starts at column 5.
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(0, 5));
        assert_eq!(absolute_row(&ed), 1);
    }

    #[test]
    fn test_vertical_motion_moves_exactly_one_row_over_tabs() {
        let text = "ab\tcdefghijklmnop\tq\txyz\n\t\tx\tabcdefg\nshort\n\tab\tcd\tef\tgh";
        for tab_size in [2, 4] {
            for cols in [5, 8] {
                let engine = Engine::new(
                    Options::default()
                        .with_tab_size(tab_size)
                        .with_flags(Flags::SOFTWRAP),
                )
                .unwrap();
                let doc = Document::from_bytes(text.as_bytes());
                let first = doc.text(0).to_vec();
                let mut ed = Editor::new(Arc::new(engine), doc, Viewport::new(4, cols).unwrap());

                for start in 0..=first.len() {
                    ed.set_cursor(Position::new(0, start));
                    ed.adjust_viewport(ScrollManner::Flowing);
                    loop {
                        let row = absolute_row(&ed);
                        if !ed.move_down() {
                            break;
                        }
                        assert_eq!(
                            absolute_row(&ed),
                            row + 1,
                            "down from row {row}, tab {tab_size}, cols {cols}, start {start}"
                        );
                    }
                    loop {
                        let row = absolute_row(&ed);
                        if !ed.move_up() {
                            break;
                        }
                        assert_eq!(
                            absolute_row(&ed) + 1,
                            row,
                            "up from row {row}, tab {tab_size}, cols {cols}, start {start}"
                        );
                    }
                    assert_eq!(absolute_row(&ed), 0);
                }
            }
        }
    }

    #[test]
    fn test_vertical_motion_by_chunks() {
        let mut ed = editor("abcdefghij\nxy", 10, 4, Flags::SOFTWRAP);
        ed.set_cursor(Position::new(0, 1));
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(0, 5));
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(0, 9));
        assert!(ed.move_down());
        assert_eq!(ed.cursor(), Position::new(1, 1));
        assert!(ed.move_up());
        assert_eq!(ed.cursor(), Position::new(0, 9));
    }

    #[test]
    fn test_move_down_scrolls_one_row() {
        let text = numbered(30);
        let mut ed = editor(&text, 5, 40, Flags::empty());
        ed.set_cursor(Position::new(4, 0));
        ed.move_down();
        assert_eq!(ed.viewport().edittop(), 1);
        assert_eq!(ed.cursor_row(), Some(4));

        let mut ed = editor(&text, 5, 40, Flags::JUMPY_SCROLLING);
        ed.set_cursor(Position::new(4, 0));
        ed.move_down();
        assert_eq!(ed.viewport().edittop(), 3);
    }

    #[test]
    fn test_page_motion() {
        let text = numbered(30);
        let mut ed = editor(&text, 5, 40, Flags::empty());
        ed.page_down();
        assert_eq!(ed.cursor(), Position::new(3, 0));
        assert_eq!(ed.viewport().edittop(), 3);
        ed.page_up();
        assert_eq!(ed.cursor(), Position::new(0, 0));
        assert_eq!(ed.viewport().edittop(), 0);

        ed.set_cursor(Position::new(28, 2));
        ed.adjust_viewport(ScrollManner::Flowing);
        ed.page_down();
        assert_eq!(ed.cursor(), Position::new(29, 7));
    }

    #[test]
    fn test_left_right_cross_lines() {
        let mut ed = editor("a中\nb", 10, 40, Flags::empty());
        ed.set_cursor(Position::new(0, 4));
        ed.move_left();
        assert_eq!(ed.cursor(), Position::new(0, 1));
        ed.move_right();
        ed.move_right();
        assert_eq!(ed.cursor(), Position::new(1, 0));
        ed.move_left();
        assert_eq!(ed.cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_smart_home() {
        let mut ed = editor("    code", 10, 40, Flags::SMART_HOME);
        ed.set_cursor(Position::new(0, 6));
        ed.move_home();
        assert_eq!(ed.cursor(), Position::new(0, 4));
        ed.move_home();
        assert_eq!(ed.cursor(), Position::new(0, 0));
        ed.move_end();
        assert_eq!(ed.cursor(), Position::new(0, 8));

        let mut ed = editor("    code", 10, 40, Flags::empty());
        ed.set_cursor(Position::new(0, 6));
        ed.move_home();
        assert_eq!(ed.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_home_end_under_softwrap() {
        let mut ed = editor("abcdefghij", 10, 4, Flags::SOFTWRAP);
        ed.set_cursor(Position::new(0, 5));
        ed.move_home();
        assert_eq!(ed.cursor(), Position::new(0, 4));
        ed.move_home();
        assert_eq!(ed.cursor(), Position::new(0, 0));

        ed.move_end();
        assert_eq!(ed.cursor(), Position::new(0, 3));
        ed.move_end();
        assert_eq!(ed.cursor(), Position::new(0, 10));
    }
}
