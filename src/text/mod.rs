//! Lines, documents and everything that moves a cursor through them.
//!
//! All offsets are byte offsets into a line's raw bytes and always sit on a
//! character boundary. Columns are display columns. Navigation never fails:
//! at a boundary it is a no-op.
//!
//! Key types:
//!
//! - [`Document`]: the ordered lines of a buffer
//! - [`Editor`]: a cursor, desired column, viewport and undo history over a
//!   document, with all motion and editing commands
//! - [`Viewport`]: the window a front-end shows
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use textcore::{Document, Editor, Engine, Position, Viewport};
//!
//! let engine = Arc::new(Engine::default());
//! let doc = Document::from_bytes("héllo\nwörld".as_bytes());
//! let mut editor = Editor::new(engine, doc, Viewport::new(24, 80).unwrap());
//!
//! editor.move_end();
//! assert_eq!(editor.cursor(), Position::new(0, 6));
//! editor.move_down();
//! assert_eq!(editor.xplustabs(), 5);
//! ```

mod block;
mod column;
mod document;
mod edit;
mod editor;
mod line;
mod motion;
mod search;
mod step;
mod viewport;
mod word;
mod wrap;

pub use document::Document;
pub use edit::DEFAULT_MAX_HISTORY_DEPTH;
pub use editor::{Editor, MotionState};
pub use line::{Line, Position};
pub use step::tail;
pub use viewport::{ScrollDirection, ScrollManner, Viewport};
pub use wrap::{Breakpoint, Chunk, Chunks};
