//! Error types for the text core.
//!
//! Navigation primitives never fail: malformed bytes and boundary positions
//! are handled in place. Errors are reserved for configuration, addressing
//! and I/O.

use std::fmt;
use std::io;

/// Result type alias for text core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for text core operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while loading or saving a document.
    Io(io::Error),
    /// Tab size must be a positive number of columns.
    InvalidTabSize(usize),
    /// The extra word-character string contains a blank.
    InvalidWordChars(String),
    /// Viewport dimension error (zero rows or columns).
    InvalidDimensions { rows: usize, cols: usize },
    /// Line index beyond the end of the document.
    LineOutOfRange { line: usize, count: usize },
    /// Byte offset beyond the end of a line.
    OffsetOutOfRange { line: usize, offset: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidTabSize(size) => write!(f, "invalid tab size: {size}"),
            Self::InvalidWordChars(chars) => {
                write!(f, "word characters must not contain blanks: {chars:?}")
            }
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid viewport dimensions: {rows}x{cols}")
            }
            Self::LineOutOfRange { line, count } => {
                write!(f, "line {line} out of range for document of {count} lines")
            }
            Self::OffsetOutOfRange { line, offset, len } => {
                write!(
                    f,
                    "offset {offset} out of range for line {line} of {len} bytes"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
