//! The immutable configuration every navigation routine runs against.

use crate::config::{Flags, Options};
use crate::error::Result;
use crate::unicode::{Classifier, Encoding};

/// Validated, immutable navigation settings.
///
/// An `Engine` bundles the character classifier with the tab size and the
/// behaviour flags. It is built once at startup and shared (typically behind
/// an [`Arc`](std::sync::Arc)) by every editor session, terminal or
/// graphical. The stepping, column, wrapping and word routines are methods
/// on this type and are spread across the `text` modules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    classifier: Classifier,
    tab_size: usize,
    flags: Flags,
}

impl Engine {
    /// Build an engine from validated options.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let mut classifier = Classifier::new(options.encoding)
            .with_width_method(options.width_method)
            .with_high_plane(options.high_plane);
        if let Some(chars) = &options.word_chars {
            classifier = classifier.with_word_chars(chars);
        }
        Ok(Self {
            classifier,
            tab_size: options.tab_size,
            flags: options.flags,
        })
    }

    /// The character classifier.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The encoding in force.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.classifier.encoding()
    }

    /// Columns per tab stop.
    #[must_use]
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// The behaviour flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether a flag is set.
    #[inline]
    #[must_use]
    pub fn is_set(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            classifier: Classifier::new(Encoding::Utf8),
            tab_size: crate::config::DEFAULT_TAB_SIZE,
            flags: Flags::empty(),
        }
    }
}
