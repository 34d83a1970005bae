//! Error-log sink for failed outcomes
//!
//! Every failure built by `Outcome::fail_if` is written to an [`ErrorSink`]
//! as one structured [`ErrorRecord`]. The sink is injected into the domain
//! services rather than reached through global state.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::outcome::{ExternalError, InternalDetail};

const NOT_AVAILABLE: &str = "N/A";

/// Structured log entry for one failed check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    pub code: u16,
    pub external: ExternalError,
    pub function: String,
    pub error_details: Value,
    pub request_details: Value,
    pub stack: String,
}

impl ErrorRecord {
    pub(crate) fn new(internal: &InternalDetail, external: &ExternalError, function: &str) -> Self {
        let backtrace = Backtrace::capture();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => backtrace.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        };

        Self {
            message: internal.message.clone(),
            code: internal.code,
            external: external.clone(),
            function: function.to_string(),
            error_details: internal
                .cause
                .clone()
                .map_or_else(|| Value::from(NOT_AVAILABLE), Value::from),
            request_details: internal
                .context
                .clone()
                .unwrap_or_else(|| Value::from(NOT_AVAILABLE)),
            stack,
        }
    }
}

/// Sink could not store a record
#[derive(Debug, Error)]
#[error("Error sink failure: {0}")]
pub struct SinkError(pub String);

/// Destination for error records
pub trait ErrorSink: Send + Sync {
    fn record(&self, record: &ErrorRecord) -> Result<(), SinkError>;
}

/// Writes records through `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        let details = serde_json::to_string(record).map_err(|e| SinkError(e.to_string()))?;

        tracing::error!(
            code = record.code,
            external_code = record.external.code,
            function = %record.function,
            record = %details,
            "{}",
            record.message
        );

        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for MemorySink {
    fn record(&self, record: &ErrorRecord) -> Result<(), SinkError> {
        self.records
            .lock()
            .map_err(|e| SinkError(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}
