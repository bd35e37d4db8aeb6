//! Uniform JSON envelope returned by every endpoint.
//!
//! ```text
//! {"status":"success","statusCode":200,"payload":{"name":"testA","age":30}}
//! {"status":"fail","statusCode":400,"payload":{"errorCode":"ERR_CLIENT_003","errorMessage":"Bad Request Exception"}}
//! ```
//!
//! The HTTP status of the rendered response always equals `statusCode`.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{CatalogEntry, ErrorCatalog};
use crate::middleware::LoggedResult;

/// Status code used when a success envelope does not override it.
pub const SUCCESS_STATUS_CODE: u16 = 200;

/// Outcome marker serialised as `"success"` or `"fail"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The payload is the business result.
    Success,
    /// The payload is an [`ErrorPayload`].
    Fail,
}

/// Error body carried by failure envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Stable machine-readable code.
    #[schema(example = "ERR_CLIENT_003")]
    pub error_code: String,
    /// Human-readable message.
    #[schema(example = "Bad Request Exception")]
    pub error_message: String,
}

impl ErrorPayload {
    /// Build a payload from explicit parts.
    pub fn new(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            error_message: error_message.into(),
        }
    }
}

impl From<CatalogEntry> for ErrorPayload {
    fn from(value: CatalogEntry) -> Self {
        Self::new(value.error_code, value.error_message)
    }
}

impl From<ErrorCatalog> for ErrorPayload {
    fn from(value: ErrorCatalog) -> Self {
        Self::from(value.entry())
    }
}

/// Response envelope wrapping a payload of type `T`.
///
/// # Examples
/// ```
/// use boilerplate::inbound::http::envelope::{ApiResponse, ResponseStatus};
///
/// let response = ApiResponse::success("done");
/// assert_eq!(response.status(), ResponseStatus::Success);
/// assert_eq!(response.status_code(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    status: ResponseStatus,
    status_code: u16,
    payload: T,
}

impl<T> ApiResponse<T> {
    /// Success envelope with the default 200 status code.
    pub const fn success(payload: T) -> Self {
        Self::success_with_status(SUCCESS_STATUS_CODE, payload)
    }

    /// Success envelope with an explicit status code.
    pub const fn success_with_status(status_code: u16, payload: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            status_code,
            payload,
        }
    }

    /// Success envelope taking the transport status directly.
    pub fn success_with(status: StatusCode, payload: T) -> Self {
        Self::success_with_status(status.as_u16(), payload)
    }

    /// Outcome marker.
    pub const fn status(&self) -> ResponseStatus {
        self.status
    }

    /// Status code mirrored onto the HTTP response.
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Wrapped payload.
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the envelope, returning the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl ApiResponse<()> {
    /// Success envelope without a payload; `payload` serialises as `null`.
    pub const fn empty() -> Self {
        Self::success(())
    }
}

impl ApiResponse<ErrorPayload> {
    /// Failure envelope. The caller supplies a catalog-derived payload.
    pub const fn fail(status_code: u16, payload: ErrorPayload) -> Self {
        Self {
            status: ResponseStatus::Fail,
            status_code,
            payload,
        }
    }

    /// Failure envelope whose status and payload come from one catalog entry.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::ErrorCatalog;
    /// use boilerplate::inbound::http::envelope::ApiResponse;
    ///
    /// let response = ApiResponse::from_catalog(ErrorCatalog::NotFound);
    /// assert_eq!(response.status_code(), 404);
    /// assert_eq!(response.payload().error_code, "ERR_CLIENT_001");
    /// ```
    pub fn from_catalog(entry: ErrorCatalog) -> Self {
        let entry = entry.entry();
        Self::fail(entry.http_status, ErrorPayload::from(entry))
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Render the envelope as an HTTP response with a matching status.
    ///
    /// The serialised payload is also attached to the response extensions as
    /// [`LoggedResult`] for the request logger.
    pub fn into_http_response(self) -> HttpResponse {
        let Ok(status) = StatusCode::from_u16(self.status_code) else {
            error!(status_code = self.status_code, "envelope carries an invalid status code");
            return internal_failure();
        };
        match serde_json::to_value(&self) {
            Ok(body) => render(status, body),
            Err(err) => {
                error!(error = %err, "failed to serialise response envelope");
                internal_failure()
            }
        }
    }
}

fn render(status: StatusCode, body: Value) -> HttpResponse {
    let payload = body.get("payload").cloned().unwrap_or(Value::Null);
    let mut response = HttpResponse::build(status).json(&body);
    response.extensions_mut().insert(LoggedResult(payload));
    response
}

fn internal_failure() -> HttpResponse {
    let envelope = ApiResponse::from_catalog(ErrorCatalog::InternalServer);
    let status = StatusCode::from_u16(envelope.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
        "status": envelope.status,
        "statusCode": envelope.status_code,
        "payload": envelope.payload,
    });
    render(status, body)
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into_http_response()
    }
}
