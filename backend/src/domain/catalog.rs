//! Error catalog: the closed set of failure conditions the API can report.
//!
//! Each [`ErrorCatalog`] variant names one condition and resolves to a fixed
//! [`CatalogEntry`] carrying the HTTP status, the stable error code clients
//! branch on, and a human-readable message. The table is compiled into the
//! binary; there is no runtime registration.

use std::fmt;
use std::str::FromStr;

/// Failure family an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or unacceptable client input.
    Client,
    /// Missing, expired or mismatched credentials.
    Auth,
    /// Unexpected failure inside the service.
    Server,
}

/// Immutable (status, code, message) triple for one catalog entry.
///
/// # Examples
/// ```
/// use boilerplate::domain::ErrorCatalog;
///
/// let entry = ErrorCatalog::BadRequest.entry();
/// assert_eq!(entry.http_status, 400);
/// assert_eq!(entry.error_code, "ERR_CLIENT_003");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Symbolic name, unique across the catalog.
    pub symbolic_name: &'static str,
    /// HTTP status placed on the transport response.
    pub http_status: u16,
    /// Stable machine-readable code.
    pub error_code: &'static str,
    /// Message shown to humans.
    pub error_message: &'static str,
}

/// Symbolic names of every catalogued failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCatalog {
    // Client errors
    NotFound,
    NullPoint,
    BadRequest,
    BadRequestMethod,
    BadRequestHeader,
    BadRequestBody,
    BadRequestParameter,
    IllegalArgument,
    JsonParse,
    IdDuplicated,
    NicknameDuplicated,
    OtherError,

    // Auth errors
    Unauthorized,
    TokenNotAllowed,
    TokenExpired,
    TokenNull,
    NotAccessToken,
    NotRefreshToken,
    NotExistAuthInToken,
    NotMatchedAuth,
    NotMatchedRefresh,
    TokenParsing,
    OtherTokenError,
    LoginDuplicated,

    // Server errors
    InternalServer,
}

const fn entry(
    symbolic_name: &'static str,
    http_status: u16,
    error_code: &'static str,
    error_message: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        symbolic_name,
        http_status,
        error_code,
        error_message,
    }
}

impl ErrorCatalog {
    /// Every entry in declaration order.
    pub const ALL: [Self; 25] = [
        Self::NotFound,
        Self::NullPoint,
        Self::BadRequest,
        Self::BadRequestMethod,
        Self::BadRequestHeader,
        Self::BadRequestBody,
        Self::BadRequestParameter,
        Self::IllegalArgument,
        Self::JsonParse,
        Self::IdDuplicated,
        Self::NicknameDuplicated,
        Self::OtherError,
        Self::Unauthorized,
        Self::TokenNotAllowed,
        Self::TokenExpired,
        Self::TokenNull,
        Self::NotAccessToken,
        Self::NotRefreshToken,
        Self::NotExistAuthInToken,
        Self::NotMatchedAuth,
        Self::NotMatchedRefresh,
        Self::TokenParsing,
        Self::OtherTokenError,
        Self::LoginDuplicated,
        Self::InternalServer,
    ];

    /// Resolve the fixed entry for this name.
    #[must_use]
    pub const fn entry(self) -> CatalogEntry {
        match self {
            Self::NotFound => entry("NOT_FOUND", 404, "ERR_CLIENT_001", "Not Found Exception"),
            Self::NullPoint => entry("NULL_POINT", 500, "ERR_CLIENT_002", "Null Point Exception"),
            Self::BadRequest => entry("BAD_REQUEST", 400, "ERR_CLIENT_003", "Bad Request Exception"),
            Self::BadRequestMethod => entry(
                "BAD_REQUEST_METHOD",
                405,
                "ERR_CLIENT_004",
                "Bad Request HTTP Method",
            ),
            Self::BadRequestHeader => entry(
                "BAD_REQUEST_HEADER",
                400,
                "ERR_CLIENT_005",
                "Request header is insufficient",
            ),
            Self::BadRequestBody => entry(
                "BAD_REQUEST_BODY",
                400,
                "ERR_CLIENT_006",
                "Request body is insufficient",
            ),
            Self::BadRequestParameter => entry(
                "BAD_REQUEST_PARAMETER",
                400,
                "ERR_CLIENT_007",
                "No request parameter",
            ),
            Self::IllegalArgument => entry(
                "ILLEGAL_ARGUMENT",
                400,
                "ERR_CLIENT_008",
                "Illegal or inappropriate argument",
            ),
            Self::JsonParse => entry("JSON_PARSE", 400, "ERR_CLIENT_009", "Json parsing Exception"),
            Self::IdDuplicated => entry("ID_DUPLICATED", 400, "ERR_CLIENT_010", "Id is duplicated"),
            Self::NicknameDuplicated => entry(
                "NICKNAME_DUPLICATED",
                400,
                "ERR_CLIENT_011",
                "Nickname is duplicated",
            ),
            Self::OtherError => entry("OTHER_ERROR", 400, "ERR_CLIENT_099", "Other Error"),
            Self::Unauthorized => entry(
                "UNAUTHORIZED",
                401,
                "ERR_AUTH_001",
                "Account is Unauthorized",
            ),
            Self::TokenNotAllowed => entry(
                "TOKEN_NOT_ALLOWED",
                403,
                "ERR_AUTH_002",
                "Token is Not Allowed",
            ),
            Self::TokenExpired => entry("TOKEN_EXPIRED", 401, "ERR_AUTH_003", "Token is Expired"),
            Self::TokenNull => entry("TOKEN_NULL", 401, "ERR_AUTH_004", "Token does not exist"),
            Self::NotAccessToken => entry(
                "NOT_ACCESS_TOKEN",
                403,
                "ERR_AUTH_005",
                "It's not AccessToken",
            ),
            Self::NotRefreshToken => entry(
                "NOT_REFRESH_TOKEN",
                403,
                "ERR_AUTH_006",
                "It's not RefreshToken",
            ),
            Self::NotExistAuthInToken => entry(
                "NOT_EXIST_AUTH_IN_TOKEN",
                401,
                "ERR_AUTH_007",
                "Account does not exist in Token",
            ),
            Self::NotMatchedAuth => entry(
                "NOT_MATCHED_AUTH",
                403,
                "ERR_AUTH_008",
                "Account in the token does not match",
            ),
            Self::NotMatchedRefresh => entry(
                "NOT_MATCHED_REFRESH",
                403,
                "ERR_AUTH_009",
                "RefreshToken does not match",
            ),
            Self::TokenParsing => entry("TOKEN_PARSING", 401, "ERR_AUTH_010", "Token Parsing Error"),
            Self::OtherTokenError => entry(
                "OTHER_TOKEN_ERROR",
                401,
                "ERR_AUTH_011",
                "Other Token Error",
            ),
            Self::LoginDuplicated => entry(
                "LOGIN_DUPLICATED",
                409,
                "ERR_AUTH_014",
                "Login was duplicated",
            ),
            Self::InternalServer => entry(
                "INTERNAL_SERVER",
                500,
                "ERR_SERVER_001",
                "Internal Server Error",
            ),
        }
    }

    /// Symbolic name such as `BAD_REQUEST`.
    #[must_use]
    pub const fn symbolic_name(self) -> &'static str {
        self.entry().symbolic_name
    }

    /// Family the entry belongs to, derived from its error code.
    #[must_use]
    pub fn category(self) -> ErrorCategory {
        let code = self.entry().error_code;
        if code.starts_with("ERR_AUTH_") {
            ErrorCategory::Auth
        } else if code.starts_with("ERR_SERVER_") {
            ErrorCategory::Server
        } else {
            ErrorCategory::Client
        }
    }

    /// Look an entry up by its symbolic name.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::ErrorCatalog;
    ///
    /// assert_eq!(
    ///     ErrorCatalog::from_symbolic_name("TOKEN_EXPIRED"),
    ///     Some(ErrorCatalog::TokenExpired)
    /// );
    /// assert_eq!(ErrorCatalog::from_symbolic_name("NOPE"), None);
    /// ```
    #[must_use]
    pub fn from_symbolic_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.symbolic_name() == name)
    }
}

impl fmt::Display for ErrorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolic_name())
    }
}

/// Raised when parsing an unknown symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error catalog entry: {0}")]
pub struct UnknownCatalogEntry(pub String);

impl FromStr for ErrorCatalog {
    type Err = UnknownCatalogEntry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbolic_name(s).ok_or_else(|| UnknownCatalogEntry(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn symbolic_names_are_unique() {
        let names: HashSet<_> = ErrorCatalog::ALL
            .iter()
            .map(|entry| entry.symbolic_name())
            .collect();
        assert_eq!(names.len(), ErrorCatalog::ALL.len());
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: HashSet<_> = ErrorCatalog::ALL
            .iter()
            .map(|entry| entry.entry().error_code)
            .collect();
        assert_eq!(codes.len(), ErrorCatalog::ALL.len());
    }

    #[test]
    fn entries_are_stable_across_reads() {
        for name in ErrorCatalog::ALL {
            assert_eq!(name.entry(), name.entry(), "{name} should be immutable");
        }
    }

    #[test]
    fn symbolic_names_round_trip_through_from_str() {
        for name in ErrorCatalog::ALL {
            let parsed: ErrorCatalog = name.symbolic_name().parse().expect("known name");
            assert_eq!(parsed, name);
        }
    }

    #[test]
    fn unknown_symbolic_name_is_rejected() {
        let err = "TEAPOT".parse::<ErrorCatalog>().expect_err("unknown name");
        assert_eq!(err, UnknownCatalogEntry("TEAPOT".to_owned()));
    }

    #[rstest]
    #[case(ErrorCatalog::NotFound, 404, "ERR_CLIENT_001", "Not Found Exception")]
    #[case(ErrorCatalog::NullPoint, 500, "ERR_CLIENT_002", "Null Point Exception")]
    #[case(ErrorCatalog::BadRequest, 400, "ERR_CLIENT_003", "Bad Request Exception")]
    #[case(ErrorCatalog::BadRequestMethod, 405, "ERR_CLIENT_004", "Bad Request HTTP Method")]
    #[case(ErrorCatalog::OtherError, 400, "ERR_CLIENT_099", "Other Error")]
    #[case(ErrorCatalog::TokenNotAllowed, 403, "ERR_AUTH_002", "Token is Not Allowed")]
    #[case(ErrorCatalog::LoginDuplicated, 409, "ERR_AUTH_014", "Login was duplicated")]
    #[case(ErrorCatalog::InternalServer, 500, "ERR_SERVER_001", "Internal Server Error")]
    fn canonical_entries(
        #[case] name: ErrorCatalog,
        #[case] status: u16,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let entry = name.entry();
        assert_eq!(entry.http_status, status);
        assert_eq!(entry.error_code, code);
        assert_eq!(entry.error_message, message);
    }

    #[rstest]
    #[case(ErrorCatalog::JsonParse, ErrorCategory::Client)]
    #[case(ErrorCatalog::NicknameDuplicated, ErrorCategory::Client)]
    #[case(ErrorCatalog::TokenExpired, ErrorCategory::Auth)]
    #[case(ErrorCatalog::InternalServer, ErrorCategory::Server)]
    fn category_follows_code_family(#[case] name: ErrorCatalog, #[case] expected: ErrorCategory) {
        assert_eq!(name.category(), expected);
    }
}
