//! Telemetry events and sinks.
//!
//! The linker records a small set of operational signals: the database
//! schema version after migrations and the outcome of every issue lookup.
//! Events never leave the process unless a sink writes them somewhere.

use std::io;

use serde::{Deserialize, Serialize};

use crate::github::LookupError;

/// Outcome of a single issue lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// GitHub returned the issue.
    Found,
    /// GitHub answered with a non-200 status or coordinates were incomplete.
    NotFound,
    /// The request failed before a response arrived.
    Transient,
    /// GitHub answered 200 with a body that did not decode.
    InvalidResponse,
}

impl LookupOutcome {
    /// Classifies a lookup result.
    #[must_use]
    pub const fn from_error(error: &LookupError) -> Self {
        match error {
            LookupError::Network { .. } => Self::Transient,
            LookupError::InvalidResponse { .. } => Self::InvalidResponse,
            LookupError::MissingCoordinates
            | LookupError::NotFound { .. }
            | LookupError::Configuration { .. } => Self::NotFound,
        }
    }
}

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20261019000000`).
        schema_version: String,
    },
    /// Records the outcome of one issue lookup.
    IssueLookupRecorded {
        /// Reference as `org/repo#n` after defaults were applied.
        reference: String,
        /// What the lookup produced.
        outcome: LookupOutcome,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// Intended for local debugging; nothing is transmitted.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sinks for asserting on emitted telemetry.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}
