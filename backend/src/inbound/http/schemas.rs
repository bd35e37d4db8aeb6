//! OpenAPI schema definitions for concrete envelopes.
//!
//! [`ApiResponse`](crate::inbound::http::envelope::ApiResponse) is generic and
//! does not derive `ToSchema`. The wrappers below mirror the envelope for each
//! payload the documented endpoints return so the generated document shows
//! the exact wire shape.

use utoipa::ToSchema;

use crate::inbound::http::demo::{Greeting, SampleDto};
use crate::inbound::http::envelope::{ErrorPayload, ResponseStatus};

/// Success envelope carrying a [`SampleDto`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SampleEnvelope {
    /// Always `success`.
    #[schema(example = "success")]
    status: ResponseStatus,
    /// Mirrors the HTTP status.
    #[schema(example = 200)]
    status_code: u16,
    payload: SampleDto,
}

/// Success envelope carrying a [`Greeting`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GreetingEnvelope {
    #[schema(example = "success")]
    status: ResponseStatus,
    #[schema(example = 200)]
    status_code: u16,
    payload: Greeting,
}

/// Failure envelope; the payload is drawn from the error catalog.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FailEnvelope {
    /// Always `fail`.
    #[schema(example = "fail")]
    status: ResponseStatus,
    /// HTTP status of the catalog entry.
    #[schema(example = 400)]
    status_code: u16,
    payload: ErrorPayload,
}
