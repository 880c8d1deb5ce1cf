//! `textcore` - multibyte-aware text navigation and editing core
//!
//! Byte-level character stepping, display-column mapping, soft-wrap chunking
//! and cursor motion over lines of raw bytes, shared by terminal and
//! graphical editor front-ends. Text may be UTF-8 or a single-byte encoding;
//! malformed input is never an error and counts as one byte, one column.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (locale FFI)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use config::{DEFAULT_TAB_SIZE, Flags, Options};
pub use engine::Engine;
pub use error::{Error, Result};
pub use logging::{LogLevel, clear_log_callback, emit_log, set_log_callback};

pub use text::{
    Breakpoint, Chunk, Document, Editor, Line, MotionState, Position, ScrollDirection,
    ScrollManner, Viewport,
};
pub use unicode::{Classifier, Encoding, HighPlanePolicy, WidthMethod};
