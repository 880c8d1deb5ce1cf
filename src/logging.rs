//! Log callback registry.
//!
//! The core never writes to stdout or stderr. Front-ends install a callback
//! with [`set_log_callback`] and route records wherever they like (a status
//! bar, a debug file, `tracing`).

use std::fmt;
use std::sync::{Mutex, OnceLock};

/// Severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Install the process-wide log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the log callback. Subsequent records are dropped.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log record to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Format and emit a log record.
///
/// The message is only formatted when a callback is installed.
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        if $crate::logging::has_log_callback() {
            $crate::logging::emit_log($level, &format!($($arg)*));
        }
    };
}

pub(crate) use log_at;

/// Whether a log callback is currently installed.
#[must_use]
pub fn has_log_callback() -> bool {
    log_callback().lock().is_ok_and(|guard| guard.is_some())
}
