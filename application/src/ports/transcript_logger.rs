//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording debate events (turns,
//! stage changes, retrieval outcomes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the debate
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields; the implementation attaches the timestamp.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "turn", "stage_change", "retrieval").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible to
/// avoid disrupting the debate loop; logging failures are silently ignored.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
