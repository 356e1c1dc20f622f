use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use stockflow_core::{LogLevel, LogSink};

/// One accepted mutation, as recorded by [`HistoryLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl core::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} - [{}] - {}",
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            self.message
        )
    }
}

/// In-memory audit trail of accepted mutations, in acceptance order.
#[derive(Debug, Default)]
pub struct HistoryLog {
    inner: Mutex<Vec<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered `"<timestamp> - [LEVEL] - message"` lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for HistoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        let entry = HistoryEntry {
            at: Utc::now(),
            level,
            message: message.to_string(),
        };
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

/// Forwards sink calls to the `tracing` macro of matching severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "stockflow::history", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "stockflow::history", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "stockflow::history", "{message}"),
            LogLevel::Error => tracing::error!(target: "stockflow::history", "{message}"),
        }
    }
}

/// Delivers every entry to each inner sink, in order.
#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl core::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl LogSink for FanoutSink {
    fn log(&self, level: LogLevel, message: &str) {
        for sink in &self.sinks {
            sink.log(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_renders_timestamp_level_and_message() {
        let history = HistoryLog::new();
        history.log(LogLevel::Info, "Created new storage location S1");

        let lines = history.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" - [INFO] - Created new storage location S1"));
        assert!(lines[0].contains('T'));
    }

    #[test]
    fn history_keeps_acceptance_order() {
        let history = HistoryLog::new();
        history.log(LogLevel::Info, "first");
        history.log(LogLevel::Warning, "second");

        let entries = history.entries();
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, LogLevel::Warning);
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let a = Arc::new(HistoryLog::new());
        let b = Arc::new(HistoryLog::new());
        let fanout = FanoutSink::new()
            .with(a.clone())
            .with(b.clone())
            .with(Arc::new(TracingSink));

        fanout.log(LogLevel::Debug, "moved");
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn entry_serializes_level_name() {
        let entry = HistoryEntry {
            at: Utc::now(),
            level: LogLevel::Error,
            message: "boom".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "ERROR");
    }
}
