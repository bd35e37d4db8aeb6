//! HTTP inbound adapter exposing REST endpoints.

pub mod demo;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod routes;
pub mod schemas;

pub use crate::domain::ApiResult;
pub use envelope::{ApiResponse, ErrorPayload, ResponseStatus};
pub use routes::{RouteDescriptor, RouteTable, Verb};
