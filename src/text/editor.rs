//! The editing session: a document, a cursor and a viewport.

use std::sync::Arc;

use crate::engine::Engine;
use crate::text::document::Document;
use crate::text::edit::History;
use crate::text::line::Position;
use crate::text::viewport::Viewport;

/// Where the cursor is relative to the ends of the document, in rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionState {
    /// Somewhere in between: moving up and moving down both work.
    #[default]
    Normal,
    /// On the first row of the document; moving up is a no-op.
    AtTop,
    /// On the last row of the document; moving down is a no-op.
    AtBottom,
}

/// One editing session.
///
/// Every navigation and editing command runs against an explicit `Editor`.
/// A terminal front-end and a graphical front-end each own their editors
/// and may share the same [`Engine`].
///
/// The cursor is a line index, a byte offset into that line that always
/// sits on a character boundary, and `placewewant`: the column the user
/// wants to be in, kept across vertical moves over shorter lines.
#[derive(Clone, Debug)]
pub struct Editor {
    pub(crate) engine: Arc<Engine>,
    pub(crate) doc: Document,
    pub(crate) view: Viewport,
    pub(crate) history: History,
    pub(crate) current: usize,
    pub(crate) current_x: usize,
    pub(crate) placewewant: usize,
}

impl Editor {
    /// Create an editor with the cursor at the start of `doc`.
    #[must_use]
    pub fn new(engine: Arc<Engine>, doc: Document, view: Viewport) -> Self {
        Self {
            engine,
            doc,
            view,
            history: History::default(),
            current: 0,
            current_x: 0,
            placewewant: 0,
        }
    }

    /// The engine this editor runs against.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The document being edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    /// Mutable access to the viewport, for resizing.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.view
    }

    /// Replace the document, resetting cursor, viewport origin and history.
    pub fn set_document(&mut self, doc: Document) {
        self.doc = doc;
        self.current = 0;
        self.current_x = 0;
        self.placewewant = 0;
        self.view.set_origin(0, 0);
        self.history.clear();
    }

    /// The cursor position.
    #[must_use]
    pub fn cursor(&self) -> Position {
        Position::new(self.current, self.current_x)
    }

    /// The desired column kept across vertical motion.
    #[must_use]
    pub fn placewewant(&self) -> usize {
        self.placewewant
    }

    /// Move the cursor to `pos`.
    ///
    /// The line is clamped to the document and the offset is moved back to
    /// the start of the character it falls in. The desired column becomes
    /// the cursor's column.
    pub fn set_cursor(&mut self, pos: Position) {
        self.current = pos.line.min(self.doc.last_line());
        let text = self.doc.text(self.current);
        let mut x = pos.x.min(text.len());
        if !self.engine.is_char_boundary(text, x) {
            x = self.engine.step_left(text, x);
        }
        self.current_x = x;
        self.update_placewewant();
    }

    /// The bytes of the cursor line.
    #[must_use]
    pub fn current_text(&self) -> &[u8] {
        self.doc.text(self.current)
    }

    /// The cursor's column on its line.
    #[must_use]
    pub fn xplustabs(&self) -> usize {
        self.engine.wideness(self.current_text(), self.current_x)
    }

    /// Where the cursor is relative to the first and last rows.
    ///
    /// A one-row document reports [`MotionState::AtTop`].
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        if self.is_on_first_row() {
            MotionState::AtTop
        } else if self.is_on_last_row() {
            MotionState::AtBottom
        } else {
            MotionState::Normal
        }
    }

    pub(crate) fn is_on_first_row(&self) -> bool {
        self.current == 0
            && self
                .engine
                .chunk_for(self.current_text(), self.xplustabs(), self.view.cols())
                == 0
    }

    pub(crate) fn is_on_last_row(&self) -> bool {
        let text = self.current_text();
        self.current == self.doc.last_line()
            && self.engine.chunk_for(text, self.xplustabs(), self.view.cols())
                == self.engine.extra_chunks_in(text, self.view.cols())
    }

    pub(crate) fn update_placewewant(&mut self) {
        self.placewewant = self.xplustabs();
    }
}
