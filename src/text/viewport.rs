//! The visible window onto a document and how it follows the cursor.

use crate::config::Flags;
use crate::error::{Error, Result};
use crate::text::editor::Editor;

/// The part of the document a front-end shows.
///
/// The top row is identified by its line (`edittop`) and, under soft-wrap,
/// the leftedge of the chunk shown there (`firstcolumn`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    rows: usize,
    cols: usize,
    edittop: usize,
    firstcolumn: usize,
}

/// How to reposition the viewport when the cursor has left it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollManner {
    /// Put the cursor row in the middle of the window.
    Centering,
    /// Scroll just far enough: the cursor ends up on the first or last row.
    Flowing,
    /// Keep the cursor on the row it was on before the motion.
    Stationary,
}

/// Direction of a one-row scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Backward,
    Forward,
}

impl Viewport {
    /// Create a viewport of `rows` by `cols`, showing the top of the document.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            edittop: 0,
            firstcolumn: 0,
        })
    }

    /// Number of text rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of text columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Line shown on the top row.
    #[must_use]
    pub fn edittop(&self) -> usize {
        self.edittop
    }

    /// Leftedge of the chunk shown on the top row.
    #[must_use]
    pub fn firstcolumn(&self) -> usize {
        self.firstcolumn
    }

    /// Change the dimensions, keeping the top row.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        *self = Self {
            edittop: self.edittop,
            firstcolumn: self.firstcolumn,
            ..Self::new(rows, cols)?
        };
        Ok(())
    }

    pub(crate) fn set_origin(&mut self, edittop: usize, firstcolumn: usize) {
        self.edittop = edittop;
        self.firstcolumn = firstcolumn;
    }
}

impl Editor {
    /// Leftedge of the chunk the cursor is in (0 without soft-wrap).
    #[must_use]
    pub fn cursor_leftedge(&self) -> usize {
        self.engine
            .leftedge_for(self.current_text(), self.xplustabs(), self.view.cols())
    }

    /// Window row of the cursor, counted from the top row. `None` when the
    /// cursor is above the window; the row may be past the bottom.
    #[must_use]
    pub fn cursor_row(&self) -> Option<usize> {
        if self.is_cursor_above_screen() {
            return None;
        }
        let engine = &self.engine;
        let cols = self.view.cols;
        let top_chunk =
            engine.chunk_for(self.doc.text(self.view.edittop), self.view.firstcolumn, cols);
        let before: usize = (self.view.edittop..self.current)
            .map(|idx| engine.extra_chunks_in(self.doc.text(idx), cols) + 1)
            .sum();
        let chunk = engine.chunk_for(self.current_text(), self.xplustabs(), cols);
        Some(before + chunk - top_chunk)
    }

    /// Whether the cursor is above the top row.
    #[must_use]
    pub fn is_cursor_above_screen(&self) -> bool {
        self.current < self.view.edittop
            || (self.current == self.view.edittop
                && self.cursor_leftedge() < self.view.firstcolumn)
    }

    /// Whether the cursor is below the bottom row.
    #[must_use]
    pub fn is_cursor_below_screen(&self) -> bool {
        let (mut line, mut leftedge) = (self.view.edittop, self.view.firstcolumn);
        self.engine.go_forward_chunks(
            &self.doc,
            self.view.rows - 1,
            &mut line,
            &mut leftedge,
            self.view.cols,
        );
        self.current > line || (self.current == line && self.cursor_leftedge() > leftedge)
    }

    /// Whether the cursor is outside the window.
    #[must_use]
    pub fn is_cursor_offscreen(&self) -> bool {
        self.is_cursor_above_screen() || self.is_cursor_below_screen()
    }

    /// Move the window so the cursor is visible, placed as `manner` says.
    ///
    /// With [`ScrollManner::Stationary`] the cursor keeps its current row
    /// when that row is inside the window.
    pub fn adjust_viewport(&mut self, manner: ScrollManner) {
        let goal = match manner {
            ScrollManner::Stationary => self
                .cursor_row()
                .unwrap_or(0)
                .min(self.view.rows - 1),
            ScrollManner::Centering => self.view.rows / 2,
            ScrollManner::Flowing if self.is_cursor_above_screen() => 0,
            ScrollManner::Flowing => self.view.rows - 1,
        };
        self.place_cursor_on_row(goal);
    }

    /// Scroll the window by one row, leaving the cursor where it is.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let (mut line, mut leftedge) = (self.view.edittop, self.view.firstcolumn);
        let cols = self.view.cols;
        match direction {
            ScrollDirection::Backward => {
                self.engine
                    .go_back_chunks(&self.doc, 1, &mut line, &mut leftedge, cols);
            }
            ScrollDirection::Forward => {
                self.engine
                    .go_forward_chunks(&self.doc, 1, &mut line, &mut leftedge, cols);
            }
        }
        self.view.set_origin(line, leftedge);
    }

    /// Set the top row so the cursor ends up `goal` rows below it.
    pub(crate) fn place_cursor_on_row(&mut self, goal: usize) {
        let mut line = self.current;
        let mut leftedge = if self.engine.is_set(Flags::SOFTWRAP) {
            self.cursor_leftedge()
        } else {
            0
        };
        self.engine
            .go_back_chunks(&self.doc, goal, &mut line, &mut leftedge, self.view.cols);
        self.view.set_origin(line, leftedge);
    }

    /// Bring the cursor back into view after a motion.
    pub(crate) fn redraw(&mut self, manner: ScrollManner) {
        if self.is_cursor_offscreen() {
            let manner = if self.engine.is_set(Flags::JUMPY_SCROLLING) {
                ScrollManner::Centering
            } else {
                manner
            };
            self.adjust_viewport(manner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::engine::Engine;
    use crate::text::document::Document;
    use crate::text::line::Position;
    use std::sync::Arc;

    fn numbered(count: usize) -> Document {
        let text: Vec<String> = (0..count).map(|n| format!("line {n}")).collect();
        Document::from_bytes(text.join("\n").as_bytes())
    }

    fn editor(doc: Document, rows: usize, cols: usize, flags: Flags) -> Editor {
        let engine = Engine::new(Options::default().with_flags(flags)).unwrap();
        Editor::new(Arc::new(engine), doc, Viewport::new(rows, cols).unwrap())
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Viewport::new(0, 80),
            Err(Error::InvalidDimensions { rows: 0, cols: 80 })
        ));
        let mut view = Viewport::new(24, 80).unwrap();
        assert!(view.resize(24, 0).is_err());
        assert_eq!(view.cols(), 80);
        view.resize(10, 40).unwrap();
        assert_eq!((view.rows(), view.cols()), (10, 40));
    }

    #[test]
    fn test_cursor_row_and_offscreen() {
        let mut ed = editor(numbered(30), 5, 20, Flags::empty());
        assert_eq!(ed.cursor_row(), Some(0));
        ed.set_cursor(Position::new(4, 0));
        assert_eq!(ed.cursor_row(), Some(4));
        assert!(!ed.is_cursor_offscreen());
        ed.set_cursor(Position::new(5, 0));
        assert!(ed.is_cursor_below_screen());
    }

    #[test]
    fn test_adjust_flowing_and_centering() {
        let mut ed = editor(numbered(30), 5, 20, Flags::empty());
        ed.set_cursor(Position::new(12, 0));
        ed.adjust_viewport(ScrollManner::Flowing);
        assert_eq!(ed.viewport().edittop(), 8);
        assert_eq!(ed.cursor_row(), Some(4));

        ed.set_cursor(Position::new(2, 0));
        ed.adjust_viewport(ScrollManner::Flowing);
        assert_eq!(ed.viewport().edittop(), 2);

        ed.set_cursor(Position::new(20, 0));
        ed.adjust_viewport(ScrollManner::Centering);
        assert_eq!(ed.viewport().edittop(), 18);
        // Near the top there is not enough room to center.
        ed.set_cursor(Position::new(1, 0));
        ed.adjust_viewport(ScrollManner::Centering);
        assert_eq!(ed.viewport().edittop(), 0);
    }

    #[test]
    fn test_scroll_by_rows() {
        let mut ed = editor(numbered(3), 2, 20, Flags::empty());
        ed.scroll(ScrollDirection::Forward);
        assert_eq!(ed.viewport().edittop(), 1);
        ed.scroll(ScrollDirection::Forward);
        ed.scroll(ScrollDirection::Forward);
        assert_eq!(ed.viewport().edittop(), 2);
        ed.scroll(ScrollDirection::Backward);
        assert_eq!(ed.viewport().edittop(), 1);
    }

    #[test]
    fn test_softwrapped_rows() {
        let doc = Document::from_bytes(b"abcdefghij\nxy");
        let mut ed = editor(doc, 2, 4, Flags::SOFTWRAP);
        ed.set_cursor(Position::new(1, 0));
        assert_eq!(ed.cursor_row(), Some(3));
        assert!(ed.is_cursor_offscreen());

        ed.adjust_viewport(ScrollManner::Flowing);
        assert_eq!(ed.viewport().edittop(), 0);
        assert_eq!(ed.viewport().firstcolumn(), 8);
        assert_eq!(ed.cursor_row(), Some(1));

        ed.scroll(ScrollDirection::Backward);
        assert_eq!(ed.viewport().firstcolumn(), 4);
    }
}
