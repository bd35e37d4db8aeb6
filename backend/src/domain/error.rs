//! Failure type returned by handlers and services.
//!
//! These errors are transport agnostic. Each variant describes one failure
//! kind and resolves to exactly one [`ErrorCatalog`] entry; the inbound HTTP
//! adapter renders that entry as a failure envelope.

use crate::domain::ErrorCatalog;

/// Failure kinds surfaced at the request boundary.
///
/// Matched exhaustively by [`Error::catalog`], so adding a variant forces a
/// catalog decision.
///
/// # Examples
/// ```
/// use boilerplate::domain::{Error, ErrorCatalog};
///
/// let err = Error::missing_header("X-Client-Id");
/// assert_eq!(err.catalog(), ErrorCatalog::BadRequestHeader);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value the handler relied on was absent.
    #[error("required value `{0}` is absent")]
    MissingValue(String),
    /// The path exists but not for this HTTP method.
    #[error("method {method} is not supported for {path}")]
    MethodNotAllowed { method: String, path: String },
    /// A required request header is missing or unreadable.
    #[error("required header `{0}` is missing")]
    MissingHeader(String),
    /// An argument was supplied but is not acceptable.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    /// A required query or form parameter is missing.
    #[error("required parameter `{0}` is missing")]
    MissingParameter(String),
    /// The request body is missing or incomplete.
    #[error("request body is insufficient: {0}")]
    InvalidBody(String),
    /// The request body is not valid JSON.
    #[error("json parsing failed: {0}")]
    JsonParse(String),
    /// An outbound call was rejected with a 4xx status.
    #[error("upstream call rejected the request with status {status}")]
    UpstreamRejected { status: u16 },
    /// No route matches the request path.
    #[error("no route matches {0}")]
    NotFound(String),
    /// A business rule rejected the request with a specific catalog entry.
    #[error("request rejected: {0}")]
    Rejected(ErrorCatalog),
    /// The service failed internally.
    #[error("internal error: {0}")]
    Internal(String),
    /// Anything no other variant describes.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Convenience constructor for [`Error::MissingValue`].
    pub fn missing_value(what: impl Into<String>) -> Self {
        Self::MissingValue(what.into())
    }

    /// Convenience constructor for [`Error::MethodNotAllowed`].
    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Convenience constructor for [`Error::MissingHeader`].
    pub fn missing_header(name: impl Into<String>) -> Self {
        Self::MissingHeader(name.into())
    }

    /// Convenience constructor for [`Error::IllegalArgument`].
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Convenience constructor for [`Error::MissingParameter`].
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Convenience constructor for [`Error::InvalidBody`].
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// Convenience constructor for [`Error::JsonParse`].
    pub fn json_parse(message: impl Into<String>) -> Self {
        Self::JsonParse(message.into())
    }

    /// Classify the status returned by an outbound call.
    ///
    /// Client errors (4xx) become [`Error::UpstreamRejected`]; any other
    /// status is not a client fault and falls through to [`Error::Other`].
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::{Error, ErrorCatalog};
    ///
    /// assert_eq!(Error::upstream(404).catalog(), ErrorCatalog::BadRequest);
    /// assert_eq!(Error::upstream(502).catalog(), ErrorCatalog::OtherError);
    /// ```
    #[must_use]
    pub fn upstream(status: u16) -> Self {
        if (400..500).contains(&status) {
            Self::UpstreamRejected { status }
        } else {
            Self::Other(format!("upstream call failed with status {status}"))
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Reject with an explicit catalog entry (auth failures, duplicates).
    #[must_use]
    pub const fn rejected(entry: ErrorCatalog) -> Self {
        Self::Rejected(entry)
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Convenience constructor for [`Error::Other`].
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Catalog entry reported to clients for this failure.
    #[must_use]
    pub const fn catalog(&self) -> ErrorCatalog {
        match self {
            Self::MissingValue(_) => ErrorCatalog::NullPoint,
            Self::MethodNotAllowed { .. } => ErrorCatalog::BadRequestMethod,
            Self::MissingHeader(_) => ErrorCatalog::BadRequestHeader,
            Self::IllegalArgument(_) => ErrorCatalog::IllegalArgument,
            Self::MissingParameter(_) => ErrorCatalog::BadRequestParameter,
            Self::InvalidBody(_) => ErrorCatalog::BadRequestBody,
            Self::JsonParse(_) => ErrorCatalog::JsonParse,
            Self::UpstreamRejected { .. } => ErrorCatalog::BadRequest,
            Self::NotFound(_) => ErrorCatalog::NotFound,
            Self::Rejected(entry) => *entry,
            Self::Internal(_) => ErrorCatalog::InternalServer,
            Self::Other(_) => ErrorCatalog::OtherError,
        }
    }

    /// Short, stable name of the failure kind for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingValue(_) => "missing_value",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::MissingHeader(_) => "missing_header",
            Self::IllegalArgument(_) => "illegal_argument",
            Self::MissingParameter(_) => "missing_parameter",
            Self::InvalidBody(_) => "invalid_body",
            Self::JsonParse(_) => "json_parse",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::NotFound(_) => "not_found",
            Self::Rejected(_) => "rejected",
            Self::Internal(_) => "internal",
            Self::Other(_) => "other",
        }
    }
}

impl From<ErrorCatalog> for Error {
    fn from(value: ErrorCatalog) -> Self {
        Self::Rejected(value)
    }
}

/// Turn an absent value into [`Error::MissingValue`].
///
/// # Examples
/// ```
/// use boilerplate::domain::{Error, RequireValue};
///
/// let name: Option<&str> = None;
/// assert_eq!(name.required("name"), Err(Error::missing_value("name")));
/// ```
pub trait RequireValue<T> {
    /// Return the contained value or fail naming `what` was missing.
    fn required(self, what: &str) -> Result<T, Error>;
}

impl<T> RequireValue<T> for Option<T> {
    fn required(self, what: &str) -> Result<T, Error> {
        self.ok_or_else(|| Error::missing_value(what))
    }
}
