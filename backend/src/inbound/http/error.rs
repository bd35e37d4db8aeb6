//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`Error`] HTTP-agnostic while turning every failure that
//! reaches the boundary into a failure envelope whose status and payload come
//! from the failure's catalog entry. This is the terminal point of the failure
//! path: the failure is logged once here and never retried.

use actix_web::dev::ServiceResponse;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{CatalogEntry, Error};
use crate::inbound::http::envelope::ApiResponse;
use crate::middleware::{LoggedResult, TraceId};

/// Transport status for a catalog entry.
///
/// Entries only carry valid HTTP statuses; anything else would be a catalog
/// defect and is reported as 500.
pub fn status_for(entry: CatalogEntry) -> StatusCode {
    StatusCode::from_u16(entry.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.catalog().entry())
    }

    fn error_response(&self) -> HttpResponse {
        let entry = self.catalog().entry();
        let trace_id = TraceId::current()
            .map(|id| id.to_string())
            .unwrap_or_default();
        error!(
            kind = self.kind(),
            error_code = entry.error_code,
            status = entry.http_status,
            trace_id = %trace_id,
            error = %self,
            detail = ?self,
            "request failed"
        );
        ApiResponse::from_catalog(self.catalog()).into_http_response()
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Framework failures without a more specific mapping use the catch-all.
        error!(error = %err, "actix error promoted to domain error");
        Error::other(err.to_string())
    }
}

/// Error handlers that wrap bare failure responses in the failure envelope.
///
/// Services outside this crate, such as Swagger UI, answer failures with
/// their own bodies. Responses already rendered as an envelope carry a
/// [`LoggedResult`] and pass through untouched.
pub fn enveloped_failures<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(envelope_failure)
}

fn envelope_failure<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if res.response().extensions().contains::<LoggedResult>() {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }
    let failure = bare_failure(res.request(), res.status());
    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, HttpResponse::from_error(failure));
    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}

fn bare_failure(req: &HttpRequest, status: StatusCode) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::not_found(req.path()),
        StatusCode::METHOD_NOT_ALLOWED => {
            Error::method_not_allowed(req.method().as_str(), req.path())
        }
        status if status.is_server_error() => {
            Error::internal(format!("service answered {status}"))
        }
        status => Error::other(format!("service answered {status}")),
    }
}
