//! Extractors and extractor configuration.
//!
//! Framework extraction failures are converted into [`Error`] here so they
//! render through the same failure envelope as handler failures. Extractors
//! also record what they pulled out of the request for the request logger.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::Error;
use crate::middleware::{LogFields, record_fields, record_param};

/// Parameter name under which JSON bodies are logged.
pub const BODY_PARAM: &str = "body";

/// JSON body extractor that records the body's [`LogFields`].
///
/// Behaves like [`web::Json`], including the application's [`json_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedJson<T>(pub T);

impl<T> LoggedJson<T> {
    /// Unwrap the body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for LoggedJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for LoggedJson<T>
where
    T: DeserializeOwned + LogFields + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let body = web::Json::<T>::from_request(&req, payload);
        Box::pin(async move {
            let web::Json(value) = body.await?;
            record_fields(&req, BODY_PARAM, &value);
            Ok(Self(value))
        })
    }
}

/// Value of the header `name`, recorded as a request parameter.
///
/// Absent or non-visible-ASCII values are a [`Error::MissingHeader`].
pub fn required_header(req: &HttpRequest, name: &str) -> Result<String, Error> {
    let value = req
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::missing_header(name))?
        .to_owned();
    record_param(req, name, Value::String(value.clone()));
    Ok(value)
}

/// JSON extractor configuration routing failures to the catalog.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_error(&err).into())
}

/// Query extractor configuration routing failures to the catalog.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| query_error(&err).into())
}

/// Path extractor configuration routing failures to the catalog.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| path_error(&err).into())
}

fn json_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(source) if source.is_data() => {
            Error::invalid_body(source.to_string())
        }
        JsonPayloadError::Deserialize(source) => Error::json_parse(source.to_string()),
        other => Error::invalid_body(other.to_string()),
    }
}

fn query_error(err: &QueryPayloadError) -> Error {
    let message = match err {
        QueryPayloadError::Deserialize(source) => source.to_string(),
        other => other.to_string(),
    };
    match missing_field(&message) {
        Some(field) => Error::missing_parameter(field),
        None => Error::illegal_argument(message),
    }
}

fn path_error(err: &PathError) -> Error {
    Error::illegal_argument(err.to_string())
}

/// Field named by a serde "missing field" message.
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split_once("missing field `")?.1;
    rest.split_once('`').map(|(field, _)| field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpMessage;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[expect(dead_code, reason = "fields exist only to drive deserialisation")]
    struct Probe {
        name: String,
        age: i32,
    }

    fn json_failure(raw: &str) -> Error {
        let source = serde_json::from_str::<Probe>(raw).expect_err("probe must fail");
        json_error(&JsonPayloadError::Deserialize(source))
    }

    #[rstest]
    #[case("{\"name\": ", Error::json_parse(""))]
    #[case("{not json}", Error::json_parse(""))]
    #[case("{\"name\": \"ada\"}", Error::invalid_body(""))]
    #[case("{\"name\": 1, \"age\": 2}", Error::invalid_body(""))]
    fn json_failures_split_syntax_from_content(#[case] raw: &str, #[case] expected: Error) {
        assert_eq!(json_failure(raw).kind(), expected.kind());
    }

    #[test]
    fn json_content_type_failures_are_body_failures() {
        assert_eq!(
            json_error(&JsonPayloadError::ContentType).kind(),
            "invalid_body"
        );
    }

    #[rstest]
    #[case("missing field `name`", Some("name"))]
    #[case("invalid digit found in string", None)]
    #[case("missing field `", None)]
    fn missing_field_extracts_the_name(#[case] message: &str, #[case] expected: Option<&str>) {
        assert_eq!(missing_field(message), expected);
    }

    #[test]
    fn query_missing_field_is_a_missing_parameter() {
        let source = serde_urlencoded_error("missing field `name`");
        assert_eq!(
            query_error(&QueryPayloadError::Deserialize(source)),
            Error::missing_parameter("name")
        );
    }

    #[test]
    fn query_type_mismatch_is_an_illegal_argument() {
        let source = serde_urlencoded_error("invalid digit found in string");
        assert_eq!(query_error(&QueryPayloadError::Deserialize(source)).kind(), "illegal_argument");
    }

    fn serde_urlencoded_error(message: &str) -> serde::de::value::Error {
        <serde::de::value::Error as serde::de::Error>::custom(message)
    }

    #[test]
    fn required_header_records_the_value() {
        let req = TestRequest::default()
            .insert_header(("X-Client-Id", " client-7 "))
            .to_http_request();
        assert_eq!(
            required_header(&req, "X-Client-Id").as_deref(),
            Ok("client-7")
        );
        let extensions = req.extensions();
        let params = extensions
            .get::<crate::middleware::CapturedParams>()
            .expect("header recorded");
        assert_eq!(params.get("X-Client-Id"), Some(&Value::from("client-7")));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn required_header_rejects_absent_values(#[case] value: Option<&'static str>) {
        let mut builder = TestRequest::default();
        if let Some(value) = value {
            builder = builder.insert_header(("X-Client-Id", value));
        }
        let req = builder.to_http_request();
        assert_eq!(
            required_header(&req, "X-Client-Id"),
            Err(Error::missing_header("X-Client-Id"))
        );
    }
}
