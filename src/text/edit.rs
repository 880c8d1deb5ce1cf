//! Editing commands and undo/redo.
//!
//! Every change to the document is recorded as an insert or delete
//! operation, so that the history can replay or revert it. Operations are
//! grouped until [`Editor::commit`] closes the group; undo and redo work a
//! group at a time.

use crate::config::Flags;
use crate::logging::{LogLevel, log_at};
use crate::text::document::end_of;
use crate::text::editor::Editor;
use crate::text::line::Position;
use crate::text::viewport::ScrollManner;

/// An edit operation for undo/redo. Line breaks in `text` are newlines.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EditOp {
    Insert { at: Position, text: Vec<u8> },
    Delete { at: Position, text: Vec<u8> },
}

impl EditOp {
    fn invert(&self) -> Self {
        match self {
            Self::Insert { at, text } => Self::Delete {
                at: *at,
                text: text.clone(),
            },
            Self::Delete { at, text } => Self::Insert {
                at: *at,
                text: text.clone(),
            },
        }
    }
}

/// Default maximum number of undo groups to retain.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Edit history for undo/redo with bounded memory usage.
#[derive(Clone, Debug)]
pub(crate) struct History {
    undo_stack: Vec<Vec<EditOp>>,
    redo_stack: Vec<Vec<EditOp>>,
    current_group: Vec<EditOp>,
    /// Oldest groups are dropped beyond this many.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current_group: Vec::new(),
            max_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl History {
    fn push(&mut self, op: EditOp) {
        self.current_group.push(op);
        self.redo_stack.clear();
    }

    fn commit(&mut self) {
        if !self.current_group.is_empty() {
            self.undo_stack.push(std::mem::take(&mut self.current_group));
            if self.undo_stack.len() > self.max_depth {
                let excess = self.undo_stack.len() - self.max_depth;
                self.undo_stack.drain(..excess);
                log_at!(LogLevel::Debug, "undo history pruned by {excess} groups");
            }
        }
    }

    fn pop_undo(&mut self) -> Option<Vec<EditOp>> {
        self.commit();
        self.undo_stack.pop()
    }

    fn pop_redo(&mut self) -> Option<Vec<EditOp>> {
        self.redo_stack.pop()
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.current_group.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_group.clear();
    }
}

impl Editor {
    /// Insert `bytes` at the cursor and move past them.
    ///
    /// Newlines in `bytes` split the line.
    pub fn insert(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.record(EditOp::Insert {
            at: self.cursor(),
            text: bytes.to_vec(),
        });
    }

    /// Break the line at the cursor. With [`Flags::AUTOINDENT`] the new line
    /// starts with the leading blanks of the current one.
    pub fn enter(&mut self) {
        let mut text = vec![b'\n'];
        if self.engine.is_set(Flags::AUTOINDENT) {
            let indent = self.engine.indent_length(self.current_text());
            text.extend_from_slice(&self.current_text()[..indent.min(self.current_x)]);
        }
        self.insert(&text);
    }

    /// Delete the character under the cursor, together with any zero-width
    /// characters that follow it. At the end of a line, join the next line.
    pub fn delete(&mut self) {
        let text = self.current_text();
        let end = if self.current_x < text.len() {
            Position::new(self.current, self.engine.visual_step_right(text, self.current_x))
        } else if self.current < self.doc.last_line() {
            Position::new(self.current + 1, 0)
        } else {
            return;
        };
        self.delete_to(self.cursor(), end);
    }

    /// Delete the character before the cursor. At the start of a line, join
    /// it to the previous line.
    pub fn backspace(&mut self) {
        let start = if self.current_x > 0 {
            Position::new(
                self.current,
                self.engine.step_left(self.current_text(), self.current_x),
            )
        } else if self.current > 0 {
            Position::new(self.current - 1, self.doc.text(self.current - 1).len())
        } else {
            return;
        };
        self.delete_to(start, self.cursor());
    }

    /// Delete from the cursor back to the start of the previous word.
    ///
    /// When that word is on an earlier line, only the text before the cursor
    /// on this line is deleted; at the start of a line the line break goes.
    pub fn chop_previous_word(&mut self) {
        let origin = self.cursor();
        self.prev_word();
        let mut target = self.cursor();
        if target.line != origin.line {
            target = if origin.x > 0 {
                Position::new(origin.line, 0)
            } else {
                Position::new(target.line, self.doc.text(target.line).len())
            };
        }
        self.set_cursor(origin);
        self.delete_to(target, origin);
    }

    /// Delete from the cursor to the start of the next word.
    ///
    /// When the next word is on a later line, only the rest of this line is
    /// deleted; at the end of a line the line break goes.
    pub fn chop_next_word(&mut self) {
        let origin = self.cursor();
        self.next_word(false);
        let mut target = self.cursor();
        let origin_len = self.doc.text(origin.line).len();
        if target.line != origin.line && origin.x < origin_len {
            target = Position::new(origin.line, origin_len);
        }
        self.set_cursor(origin);
        self.delete_to(origin, target);
    }

    /// Close the current undo group.
    pub fn commit(&mut self) {
        self.history.commit();
    }

    /// Revert the last undo group. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(ops) = self.history.pop_undo() else {
            return false;
        };
        for op in ops.iter().rev() {
            self.apply_op(&op.invert());
        }
        self.history.redo_stack.push(ops);
        true
    }

    /// Replay the last undone group. Returns `false` when there is none.
    pub fn redo(&mut self) -> bool {
        let Some(ops) = self.history.pop_redo() else {
            return false;
        };
        for op in &ops {
            self.apply_op(op);
        }
        self.history.undo_stack.push(ops);
        true
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Set the maximum number of undo groups kept. Takes effect on the next
    /// commit.
    pub fn set_max_history_depth(&mut self, max_depth: usize) {
        self.history.max_depth = max_depth;
    }

    /// The maximum number of undo groups kept.
    #[must_use]
    pub fn max_history_depth(&self) -> usize {
        self.history.max_depth
    }

    fn delete_to(&mut self, start: Position, end: Position) {
        if start >= end {
            return;
        }
        let text = self.doc.remove_between(start, end);
        self.history.push(EditOp::Delete { at: start, text });
        self.place_after_edit(start);
    }

    fn record(&mut self, op: EditOp) {
        self.apply_op(&op);
        self.history.push(op);
    }

    fn apply_op(&mut self, op: &EditOp) {
        let cursor = match op {
            EditOp::Insert { at, text } => self.doc.insert_at(*at, text),
            EditOp::Delete { at, text } => {
                self.doc.remove_between(*at, end_of(*at, text));
                *at
            }
        };
        self.place_after_edit(cursor);
    }

    /// Put the cursor at `cursor`, moving it back to the start of the
    /// character it falls in. Joining malformed bytes can turn an offset
    /// that was a boundary into one inside a multibyte sequence.
    fn place_after_edit(&mut self, cursor: Position) {
        self.current = cursor.line;
        let text = self.doc.text(cursor.line);
        let mut x = cursor.x.min(text.len());
        if !self.engine.is_char_boundary(text, x) {
            x = self.engine.step_left(text, x);
        }
        self.current_x = x;
        self.update_placewewant();
        self.redraw(ScrollManner::Flowing);
    }
}
