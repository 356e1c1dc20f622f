//! Tracing, logging and the audit trail (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Audit-trail sinks: in-memory history, tracing forwarder, fan-out.
pub mod history;

pub use history::{FanoutSink, HistoryEntry, HistoryLog, TracingSink};
