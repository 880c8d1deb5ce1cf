//! Engine configuration.
//!
//! The core consumes configuration, it never produces it: front-ends parse
//! their rcfiles and command lines and hand the result over as [`Options`].

use crate::error::{Error, Result};
use crate::unicode::{Encoding, HighPlanePolicy, WidthMethod};
use bitflags::bitflags;

/// Default tab size in columns.
pub const DEFAULT_TAB_SIZE: usize = 8;

bitflags! {
    /// Behaviour toggles that change how navigation works.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u16 {
        /// Display long lines over several rows (chunks).
        const SOFTWRAP        = 0x0001;
        /// When soft-wrapping, break rows after blanks instead of at the edge.
        const AT_BLANKS       = 0x0002;
        /// Home jumps to the first non-blank before going to column zero.
        const SMART_HOME      = 0x0004;
        /// Punctuation counts as part of a word for word motion.
        const WORD_BOUNDS     = 0x0008;
        /// Recenter instead of scrolling one row when the cursor leaves the view.
        const JUMPY_SCROLLING = 0x0010;
        /// A new line starts with the indentation of the previous one.
        const AUTOINDENT      = 0x0020;
    }
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// How line bytes are interpreted.
    pub encoding: Encoding,
    /// Columns per tab stop. Must be positive.
    pub tab_size: usize,
    /// Extra characters counted as word characters. Must not contain blanks.
    pub word_chars: Option<String>,
    /// Width of East-Asian ambiguous characters.
    pub width_method: WidthMethod,
    /// Width treatment of codepoints above U+F0000.
    pub high_plane: HighPlanePolicy,
    /// Behaviour toggles.
    pub flags: Flags,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            tab_size: DEFAULT_TAB_SIZE,
            word_chars: None,
            width_method: WidthMethod::default(),
            high_plane: HighPlanePolicy::default(),
            flags: Flags::empty(),
        }
    }
}

impl Options {
    /// Default options with the encoding taken from the process locale.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            encoding: Encoding::detect(),
            ..Self::default()
        }
    }

    /// Set the encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the tab size.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set the extra word characters.
    #[must_use]
    pub fn with_word_chars(mut self, chars: impl Into<String>) -> Self {
        self.word_chars = Some(chars.into());
        self
    }

    /// Set the ambiguous-width method.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Set the high-plane width policy.
    #[must_use]
    pub fn with_high_plane(mut self, policy: HighPlanePolicy) -> Self {
        self.high_plane = policy;
        self
    }

    /// Replace all flags.
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Turn on additional flags.
    #[must_use]
    pub fn enable(mut self, flags: Flags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Check the options for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tab_size == 0 {
            return Err(Error::InvalidTabSize(self.tab_size));
        }
        if let Some(chars) = &self.word_chars {
            if chars.chars().any(char::is_whitespace) {
                return Err(Error::InvalidWordChars(chars.clone()));
            }
        }
        Ok(())
    }
}
