//! Diagnostic sinks for per-event processing failures.

use parking_lot::Mutex;
use tf_error::TfError;
use tf_types::Event;
use tracing::error;

/// Receives failures that processors isolate at event granularity.
///
/// Processors never raise per-event failures to their caller; they report
/// them here and carry on with the rest of the batch.
pub trait DiagnosticSink: Send + Sync {
    /// Called once for each event whose processing stopped on an error.
    ///
    /// # Arguments
    ///
    /// * `position` - Index of the event within its batch
    /// * `event` - The event, in whatever state it reached
    /// * `error` - Why processing stopped
    fn event_failed(&self, position: usize, event: &Event, error: &TfError);
}

/// Sink that logs failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn event_failed(&self, position: usize, event: &Event, error: &TfError) {
        error!(
            position,
            error = %error,
            event = ?event,
            "There was an error while processing event"
        );
    }
}

/// A failure captured by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFailure {
    /// Index of the event within its batch
    pub position: usize,

    /// Rendered error message
    pub message: String,

    /// Snapshot of the event at failure time
    pub event: Event,
}

/// Sink that keeps failures in memory.
///
/// Useful for tests and for callers that want to route failed events
/// somewhere other than the log.
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<RecordedFailure>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the failures recorded so far, ordered by position.
    pub fn failures(&self) -> Vec<RecordedFailure> {
        let mut failures = self.failures.lock().clone();
        failures.sort_by_key(|f| f.position);
        failures
    }

    /// Number of failures recorded so far.
    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    /// Returns true if nothing has failed.
    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn event_failed(&self, position: usize, event: &Event, error: &TfError) {
        self.failures.lock().push(RecordedFailure {
            position,
            message: error.to_string(),
            event: event.clone(),
        });
    }
}
