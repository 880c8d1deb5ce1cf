//! Display width lookup for decoded characters.

use unicode_width::UnicodeWidthChar;

/// First codepoint of the plane-15/16 private use range targeted by
/// [`HighPlanePolicy::SingleWidth`].
pub const HIGH_PLANE_START: u32 = 0xF0000;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Width treatment for codepoints at and above [`HIGH_PLANE_START`].
///
/// Some C libraries report these private-use codepoints as zero width,
/// which makes them vanish on screen. `SingleWidth` overrides the table and
/// always gives them one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighPlanePolicy {
    /// Use the width table as is.
    Table,
    /// Never zero width, always one column.
    SingleWidth,
}

impl Default for HighPlanePolicy {
    fn default() -> Self {
        if cfg!(target_os = "openbsd") {
            Self::SingleWidth
        } else {
            Self::Table
        }
    }
}

/// Table width of a character, `None` for characters without a defined
/// width (control characters).
#[must_use]
pub fn char_width(c: char, method: WidthMethod) -> Option<usize> {
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c),
    }
}

/// Display width of a character in columns, applying the high-plane policy.
///
/// Characters with no defined width count as one column.
#[must_use]
pub fn display_width_char(c: char, method: WidthMethod, policy: HighPlanePolicy) -> usize {
    if policy == HighPlanePolicy::SingleWidth && u32::from(c) >= HIGH_PLANE_START {
        return 1;
    }
    char_width(c, method).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(char_width('a', WidthMethod::WcWidth), Some(1));
        assert_eq!(
            display_width_char('a', WidthMethod::WcWidth, HighPlanePolicy::Table),
            1
        );
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(char_width('中', WidthMethod::WcWidth), Some(2));
        assert_eq!(char_width('漢', WidthMethod::Unicode), Some(2));
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(char_width('\u{0301}', WidthMethod::WcWidth), Some(0));
    }

    #[test]
    fn test_width_methods() {
        // Circled digit one is ambiguous: narrow for wcwidth, wide for CJK.
        let ch = '①';
        assert_eq!(char_width(ch, WidthMethod::WcWidth), Some(1));
        assert_eq!(char_width(ch, WidthMethod::Unicode), Some(2));
    }

    #[test]
    fn test_high_plane_policy() {
        let c = '\u{F0001}';
        assert_eq!(
            display_width_char(c, WidthMethod::WcWidth, HighPlanePolicy::SingleWidth),
            1
        );
        // Below the threshold the policy has no effect.
        assert_eq!(
            display_width_char('\u{0301}', WidthMethod::WcWidth, HighPlanePolicy::SingleWidth),
            0
        );
    }
}
