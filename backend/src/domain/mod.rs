//! Domain vocabulary shared by every adapter.
//!
//! Purpose: define the closed error catalog and the failure type handlers
//! return. Both stay free of HTTP types so any inbound adapter can render
//! them.
//!
//! Public surface:
//! - ErrorCatalog / CatalogEntry: fixed (status, code, message) table.
//! - Error: tagged failure kinds resolved to catalog entries.
//! - RequireValue: `Option` helper producing [`Error::MissingValue`].

pub mod catalog;
pub mod error;

pub use self::catalog::{CatalogEntry, ErrorCatalog, ErrorCategory, UnknownCatalogEntry};
pub use self::error::{Error, RequireValue};

/// Convenient result alias for fallible handlers and services.
///
/// # Examples
/// ```
/// use boilerplate::domain::{ApiResult, Error, ErrorCatalog};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::rejected(ErrorCatalog::Unauthorized))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Header carrying the per-request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
