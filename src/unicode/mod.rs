//! Byte-level Unicode handling: codec, widths, classification, locale.

mod classify;
mod codec;
mod locale;
mod width;

pub use classify::{Classifier, bracket_match};
pub use codec::Encoding;
pub use width::{
    HIGH_PLANE_START, HighPlanePolicy, WidthMethod, char_width, display_width_char,
};
