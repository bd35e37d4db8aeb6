//! Explicit log projection for request arguments.
//!
//! Argument types that should appear in request logs implement [`LogFields`],
//! returning a flat list of key/value pairs. Extractors record those pairs in
//! the request extensions as [`CapturedParams`]; the request logger reads
//! them back once the handler has run.

use std::collections::BTreeMap;

use actix_web::{HttpMessage, HttpRequest};
use serde_json::Value;

/// Flattened key/value view of a loggable value.
///
/// # Examples
/// ```
/// use boilerplate::middleware::LogFields;
/// use serde_json::{Value, json};
///
/// struct Login {
///     username: String,
/// }
///
/// impl LogFields for Login {
///     fn log_fields(&self) -> Vec<(&'static str, Value)> {
///         vec![("username", json!(self.username))]
///     }
/// }
///
/// let fields = Login { username: "ada".into() }.log_fields();
/// assert_eq!(fields, vec![("username", json!("ada"))]);
/// ```
pub trait LogFields {
    /// Fields to log, in the order they should appear.
    fn log_fields(&self) -> Vec<(&'static str, Value)>;

    /// Collect the fields into a JSON object.
    fn log_object(&self) -> Value {
        Value::Object(
            self.log_fields()
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        )
    }
}

/// Parameters captured for the active request, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedParams(BTreeMap<String, Value>);

impl CapturedParams {
    /// Record one parameter, replacing any previous value under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Render as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for CapturedParams {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Serialised response payload attached to a response for the request logger.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedResult(pub Value);

/// Record a single parameter against the current request.
pub fn record_param(req: &HttpRequest, name: impl Into<String>, value: Value) {
    let mut extensions = req.extensions_mut();
    if let Some(params) = extensions.get_mut::<CapturedParams>() {
        params.insert(name, value);
        return;
    }
    let mut params = CapturedParams::default();
    params.insert(name, value);
    extensions.insert(params);
}

/// Record a [`LogFields`] value under the parameter `name`.
pub fn record_fields<T: LogFields + ?Sized>(req: &HttpRequest, name: &str, value: &T) {
    record_param(req, name, value.log_object());
}
