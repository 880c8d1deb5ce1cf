//! Character classification over raw line bytes.
//!
//! Every predicate looks at the character starting at the beginning of the
//! given slice. An empty slice (end of line) is never a letter, blank,
//! control or word character.

use super::codec::Encoding;
use super::width::{HIGH_PLANE_START, HighPlanePolicy, WidthMethod, char_width};

const DEL_CODE: u8 = 0x7F;

/// Classifies characters under a fixed encoding.
///
/// A `Classifier` is built once from the configuration and never changes
/// afterwards; all navigation code reads the encoding through it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classifier {
    encoding: Encoding,
    width_method: WidthMethod,
    high_plane: HighPlanePolicy,
    word_chars: Vec<u8>,
}

impl Classifier {
    /// Create a classifier for the given encoding with default width rules.
    #[must_use]
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
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

    /// Set the extra word characters.
    #[must_use]
    pub fn with_word_chars(mut self, chars: &str) -> Self {
        self.word_chars = chars.as_bytes().to_vec();
        self
    }

    /// The encoding in force.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The ambiguous-width method in force.
    #[must_use]
    pub fn width_method(&self) -> WidthMethod {
        self.width_method
    }

    /// The high-plane policy in force.
    #[must_use]
    pub fn high_plane(&self) -> HighPlanePolicy {
        self.high_plane
    }

    /// See [`Encoding::decode`].
    #[inline]
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> Option<(char, usize)> {
        self.encoding.decode(bytes)
    }

    /// See [`Encoding::char_length`].
    #[inline]
    #[must_use]
    pub fn char_length(&self, bytes: &[u8]) -> usize {
        self.encoding.char_length(bytes)
    }

    /// Decode for classification purposes. In raw mode only ASCII has a
    /// meaning; high bytes classify as nothing.
    fn classified(&self, bytes: &[u8]) -> Option<char> {
        let &first = bytes.first()?;
        if self.encoding == Encoding::Raw && first >= 0x80 {
            return None;
        }
        self.decode(bytes).map(|(c, _)| c)
    }

    /// Whether the character is a letter.
    #[must_use]
    pub fn is_letter(&self, bytes: &[u8]) -> bool {
        self.classified(bytes).is_some_and(char::is_alphabetic)
    }

    /// Whether the character is a letter or a digit.
    #[must_use]
    pub fn is_alnum(&self, bytes: &[u8]) -> bool {
        self.classified(bytes).is_some_and(char::is_alphanumeric)
    }

    /// Whether the character is a blank: horizontal whitespace.
    #[must_use]
    pub fn is_blank(&self, bytes: &[u8]) -> bool {
        match bytes.first() {
            None => false,
            Some(&b) if b < 0x80 => b == b' ' || b == b'\t',
            Some(_) => self.classified(bytes).is_some_and(is_unicode_blank),
        }
    }

    /// Whether the character is a C0 control, DEL, or a C1 control.
    #[must_use]
    pub fn is_control(&self, bytes: &[u8]) -> bool {
        let Some(&b0) = bytes.first() else {
            return false;
        };
        match self.encoding {
            Encoding::Utf8 => {
                (b0 & 0xE0) == 0
                    || b0 == DEL_CODE
                    || (b0 == 0xC2 && bytes.get(1).is_some_and(|&b1| (0x80..0xA0).contains(&b1)))
            }
            Encoding::Raw => (b0 & 0x60) == 0 || b0 == DEL_CODE,
        }
    }

    /// Whether the character is punctuation (or another visible symbol).
    #[must_use]
    pub fn is_punct(&self, bytes: &[u8]) -> bool {
        self.classified(bytes).is_some_and(|c| {
            !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
        })
    }

    /// Whether the character belongs to a word.
    ///
    /// Letters and digits always do; punctuation does when `allow_punct` is
    /// set; so does anything listed in the extra word characters.
    #[must_use]
    pub fn is_word_char(&self, bytes: &[u8], allow_punct: bool) -> bool {
        if bytes.is_empty() {
            return false;
        }
        if self.is_alnum(bytes) {
            return true;
        }
        if allow_punct && self.is_punct(bytes) {
            return true;
        }
        if self.word_chars.is_empty() {
            return false;
        }
        let symbol = self.encoding.collect_char(bytes);
        let mut idx = 0;
        while idx < self.word_chars.len() {
            let len = self.encoding.char_length(&self.word_chars[idx..]);
            if self.word_chars[idx..idx + len] == *symbol {
                return true;
            }
            idx += len;
        }
        false
    }

    /// Whether the character takes two columns.
    #[must_use]
    pub fn is_double_width(&self, bytes: &[u8]) -> bool {
        if self.encoding == Encoding::Raw {
            return false;
        }
        match self.decode(bytes) {
            Some((c, _)) if u32::from(c) >= 0x1100 => {
                char_width(c, self.width_method) == Some(2)
            }
            _ => false,
        }
    }

    /// Whether the character takes no columns (combining marks and the like).
    #[must_use]
    pub fn is_zero_width(&self, bytes: &[u8]) -> bool {
        if self.encoding == Encoding::Raw {
            return false;
        }
        match self.decode(bytes) {
            Some((c, _)) if u32::from(c) >= 0x300 => {
                if self.high_plane == HighPlanePolicy::SingleWidth
                    && u32::from(c) >= HIGH_PLANE_START
                {
                    return false;
                }
                char_width(c, self.width_method) == Some(0)
            }
            _ => false,
        }
    }

    /// The letter shown after a caret for a control character.
    #[must_use]
    pub fn control_rep(&self, bytes: &[u8]) -> char {
        let byte = match (self.encoding, bytes) {
            (Encoding::Utf8, [0xC2, second, ..]) => *second,
            (_, [first, ..]) => *first,
            (_, []) => 0,
        };
        control_rep_byte(byte)
    }
}

/// The complementary bracket for `{}[]()`, `None` for anything else.
#[must_use]
pub fn bracket_match(ch: u8) -> Option<u8> {
    match ch {
        b'(' => Some(b')'),
        b')' => Some(b'('),
        b'[' => Some(b']'),
        b']' => Some(b'['),
        b'{' => Some(b'}'),
        b'}' => Some(b'{'),
        _ => None,
    }
}

fn control_rep_byte(byte: u8) -> char {
    match byte {
        DEL_CODE => '?',
        0x9F => '=',
        0x80..=0x9E => char::from(byte - 0x20),
        _ => char::from((byte & 0x1F) + 0x40),
    }
}

fn is_unicode_blank(c: char) -> bool {
    c.is_whitespace()
        && !matches!(
            c,
            '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
}
