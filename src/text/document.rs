//! The ordered sequence of lines that makes up a buffer.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::logging::{LogLevel, log_at};
use crate::text::line::{Line, Position};

/// An ordered, owning sequence of lines.
///
/// A document always holds at least one (possibly empty) line. Line
/// numbers shown to users are the index plus one. Lines are dropped with
/// the document or when an edit removes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }
}

impl Document {
    /// Create a document holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document by splitting `bytes` on newlines.
    ///
    /// A trailing newline produces a final empty line, so that
    /// [`to_bytes`](Self::to_bytes) gives back exactly the input.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            lines: bytes.split(|&b| b == b'\n').map(Line::from).collect(),
        }
    }

    /// Read a document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let doc = Self::from_bytes(&bytes);
        log_at!(
            LogLevel::Info,
            "read {} lines ({} bytes) from {}",
            doc.line_count(),
            bytes.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Write the document to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes();
        fs::write(path, &bytes)?;
        log_at!(
            LogLevel::Info,
            "wrote {} lines ({} bytes) to {}",
            self.line_count(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    /// The whole document, lines joined with newlines.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(Line::len).sum::<usize>() + self.lines.len();
        let mut out = Vec::with_capacity(total);
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(line.as_bytes());
        }
        out
    }

    /// Number of lines (at least one).
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the last line.
    #[inline]
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    /// The line at `idx`, if any.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// The bytes of line `idx`; empty when out of range.
    #[inline]
    #[must_use]
    pub fn text(&self, idx: usize) -> &[u8] {
        self.lines.get(idx).map_or(&[], Line::as_bytes)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &Line> {
        self.lines.iter()
    }

    /// Check that `pos` names an existing line and an offset within it.
    pub fn check(&self, pos: Position) -> Result<()> {
        let line = self.lines.get(pos.line).ok_or(Error::LineOutOfRange {
            line: pos.line,
            count: self.lines.len(),
        })?;
        if pos.x > line.len() {
            return Err(Error::OffsetOutOfRange {
                line: pos.line,
                offset: pos.x,
                len: line.len(),
            });
        }
        Ok(())
    }

    /// Insert `bytes` at `pos`. Newlines in `bytes` split the line.
    ///
    /// Returns the position just past the inserted text. That offset is a
    /// byte offset and may fall inside a character when the inserted bytes
    /// combine with their neighbours into one multibyte sequence.
    pub fn insert_text(&mut self, pos: Position, bytes: &[u8]) -> Result<Position> {
        self.check(pos)?;
        Ok(self.insert_at(pos, bytes))
    }

    /// Remove the text between two positions (in either order) and return
    /// it, with line breaks as newlines.
    pub fn delete_range(&mut self, from: Position, to: Position) -> Result<Vec<u8>> {
        self.check(from)?;
        self.check(to)?;
        Ok(self.remove_between(from.min(to), from.max(to)))
    }

    /// Insert at a position already known to be valid.
    pub(crate) fn insert_at(&mut self, pos: Position, bytes: &[u8]) -> Position {
        let mut segments = bytes.split(|&b| b == b'\n');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&[u8]> = segments.collect();

        let Some((&last, middle)) = rest.split_last() else {
            self.lines[pos.line].insert_bytes(pos.x, first);
            return Position::new(pos.line, pos.x + first.len());
        };

        let mut tail = self.lines[pos.line].split_off(pos.x);
        self.lines[pos.line].insert_bytes(pos.x, first);

        let mut last_line = Line::from(last);
        last_line.append(&mut tail);

        let new_lines = middle
            .iter()
            .map(|&segment| Line::from(segment))
            .chain(std::iter::once(last_line));
        let at = pos.line + 1;
        self.lines.splice(at..at, new_lines);

        Position::new(pos.line + rest.len(), last.len())
    }

    /// Remove between two valid, ordered positions.
    pub(crate) fn remove_between(&mut self, start: Position, end: Position) -> Vec<u8> {
        if start.line == end.line {
            return self.lines[start.line].remove_bytes(start.x, end.x);
        }

        let first_len = self.lines[start.line].len();
        let mut removed = self.lines[start.line].remove_bytes(start.x, first_len);
        let mut tail = self.lines[end.line].split_off(end.x);
        for line in self.lines.drain(start.line + 1..=end.line) {
            removed.push(b'\n');
            removed.extend_from_slice(line.as_bytes());
        }
        self.lines[start.line].append(&mut tail);
        removed
    }
}

/// The position just past `text` when it is inserted at `at`.
pub(crate) fn end_of(at: Position, text: &[u8]) -> Position {
    match text.iter().rposition(|&b| b == b'\n') {
        None => Position::new(at.line, at.x + text.len()),
        Some(last_break) => {
            let breaks = text.iter().filter(|&&b| b == b'\n').count();
            Position::new(at.line + breaks, text.len() - last_break - 1)
        }
    }
}
