//! Severity levels and the sink seam for the audit trail.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};

/// Severity attached to each audit entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Debug,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one call per accepted mutation.
///
/// Sinks are a side channel: nothing in the domain reads back what they
/// record, and their behavior never changes an operation's result.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(LogLevel, &str) + Send + Sync,
{
    fn log(&self, level: LogLevel, message: &str) {
        self(level, message)
    }
}

/// Deliver to an optional sink, swallowing a panicking sink.
pub fn emit(sink: Option<&dyn LogSink>, level: LogLevel, message: &str) {
    let Some(sink) = sink else {
        return;
    };

    if catch_unwind(AssertUnwindSafe(|| sink.log(level, message))).is_err() {
        tracing::warn!(level = level.as_str(), "log sink panicked; entry dropped");
    }
}
