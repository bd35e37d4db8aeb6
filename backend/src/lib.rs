//! Web service boilerplate: response envelope, error catalog, failure
//! mapping, request logging and API documentation.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{RequestLog, TraceId};
