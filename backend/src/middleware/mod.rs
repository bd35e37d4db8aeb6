//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! trace correlation and request logging.

pub mod log_fields;
pub mod request_log;
pub mod trace;

pub use log_fields::{CapturedParams, LogFields, LoggedResult, record_fields, record_param};
pub use request_log::{
    RequestFinished, RequestLog, RequestLogSink, RequestStarted, TracingRequestLog,
};
pub use trace::TraceId;
