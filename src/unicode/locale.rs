//! Encoding detection from the process locale.
//!
//! The encoding is decided once at startup. On Unix the C library is asked
//! for the codeset of the environment's `LC_CTYPE`; elsewhere, or when that
//! fails, the usual locale variables are inspected.

use super::Encoding;
use std::env;

impl Encoding {
    /// Pick the encoding for this process.
    #[must_use]
    pub fn detect() -> Self {
        if let Some(codeset) = platform_codeset() {
            return Self::from_codeset(&codeset);
        }
        Self::from_locale_vars(
            env::var("LC_ALL").ok().as_deref(),
            env::var("LC_CTYPE").ok().as_deref(),
            env::var("LANG").ok().as_deref(),
        )
    }

    /// Map a codeset name (`"UTF-8"`, `"ISO-8859-1"`, ...) to an encoding.
    #[must_use]
    pub fn from_codeset(codeset: &str) -> Self {
        let normalized: String = codeset
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if normalized == "utf8" {
            Self::Utf8
        } else {
            Self::Raw
        }
    }

    /// Resolve the encoding from locale variables using POSIX precedence:
    /// the first non-empty of `LC_ALL`, `LC_CTYPE`, `LANG` wins.
    #[must_use]
    pub fn from_locale_vars(
        lc_all: Option<&str>,
        lc_ctype: Option<&str>,
        lang: Option<&str>,
    ) -> Self {
        let locale = [lc_all, lc_ctype, lang]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty());
        match locale {
            Some(name) => {
                let codeset = name
                    .split_once('.')
                    .map_or("", |(_, rest)| rest.split('@').next().unwrap_or(rest));
                Self::from_codeset(codeset)
            }
            None => Self::Raw,
        }
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn platform_codeset() -> Option<String> {
    use std::ffi::CStr;

    // SAFETY: setlocale with an empty string only reads the environment;
    // the returned pointer is checked for NULL and never dereferenced here.
    let applied = unsafe { libc::setlocale(libc::LC_CTYPE, c"".as_ptr()) };
    if applied.is_null() {
        return None;
    }
    // SAFETY: nl_langinfo returns a pointer to a static NUL-terminated
    // string owned by the C library, valid until the next locale change.
    let codeset = unsafe { libc::nl_langinfo(libc::CODESET) };
    if codeset.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the nl_langinfo contract.
    let value = unsafe { CStr::from_ptr(codeset) };
    value.to_str().ok().map(str::to_owned)
}

#[cfg(not(unix))]
fn platform_codeset() -> Option<String> {
    None
}
