//! A single line of text and positions within a document.

use std::fmt;

/// A position in a document: a zero-based line index and a byte offset
/// into that line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset into the line.
    pub x: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: usize, x: usize) -> Self {
        Self { line, x }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.x)
    }
}

/// The bytes of one line, without its terminating newline.
///
/// The bytes are not required to be valid in any encoding; malformed
/// sequences are handled by the navigation routines one byte at a time.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    data: Vec<u8>,
}

impl Line {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line's bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the line has no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn insert_bytes(&mut self, x: usize, bytes: &[u8]) {
        self.data.splice(x..x, bytes.iter().copied());
    }

    pub(crate) fn remove_bytes(&mut self, start: usize, end: usize) -> Vec<u8> {
        self.data.drain(start..end).collect()
    }

    /// Cut the line at `x`, returning everything from `x` on.
    pub(crate) fn split_off(&mut self, x: usize) -> Self {
        Self {
            data: self.data.split_off(x),
        }
    }

    pub(crate) fn append(&mut self, other: &mut Self) {
        self.data.append(&mut other.data);
    }
}

impl From<&[u8]> for Line {
    fn from(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<Vec<u8>> for Line {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Line")
            .field(&String::from_utf8_lossy(&self.data))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_editing() {
        let mut line = Line::from("hello world");
        line.insert_bytes(5, b",");
        assert_eq!(line.as_bytes(), b"hello, world");
        assert_eq!(line.remove_bytes(5, 6), b",");

        let mut rest = line.split_off(5);
        assert_eq!(line.as_bytes(), b"hello");
        assert_eq!(rest.as_bytes(), b" world");

        line.append(&mut rest);
        assert_eq!(line.as_bytes(), b"hello world");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 3).to_string(), "1:3");
        assert!(Position::new(1, 0) > Position::new(0, 99));
    }
}
