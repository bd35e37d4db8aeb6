//! Test utilities for the boilerplate crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, PoisonError};

use crate::middleware::{RequestFinished, RequestLogSink, RequestStarted};

/// One captured request log record.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Started(RequestStarted),
    Finished(RequestFinished),
}

/// Request log sink keeping every record in memory.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use boilerplate::test_support::RecordingRequestLog;
///
/// let sink = Arc::new(RecordingRequestLog::default());
/// assert!(sink.records().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingRequestLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingRequestLog {
    /// Fresh shared sink.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the records captured so far, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Start records only.
    pub fn started_records(&self) -> Vec<RequestStarted> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                LogRecord::Started(started) => Some(started),
                LogRecord::Finished(_) => None,
            })
            .collect()
    }

    /// End records only.
    pub fn finished_records(&self) -> Vec<RequestFinished> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                LogRecord::Finished(finished) => Some(finished),
                LogRecord::Started(_) => None,
            })
            .collect()
    }

    fn push(&self, record: LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

impl RequestLogSink for RecordingRequestLog {
    fn started(&self, record: &RequestStarted) {
        self.push(LogRecord::Started(record.clone()));
    }

    fn finished(&self, record: &RequestFinished) {
        self.push(LogRecord::Finished(record.clone()));
    }
}
