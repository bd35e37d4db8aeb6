//! Route descriptors attached at registration time.
//!
//! Every endpoint is registered from a [`RouteDescriptor`] so the request
//! logger and the unmatched-route fallback read route metadata from the same
//! table the router was built from.

use std::fmt;

use actix_web::dev::ResourceDef;
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, Resource, Route, web};

use crate::domain::{ApiResult, Error};

/// HTTP verbs used by registered routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Matching actix method.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    /// Whether `method` is this verb.
    #[must_use]
    pub fn matches(self, method: &Method) -> bool {
        self.method() == *method
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for one endpoint: operation name, verb and path fragments.
///
/// # Examples
/// ```
/// use boilerplate::inbound::http::routes::{RouteDescriptor, Verb};
///
/// const SUCCESS: RouteDescriptor =
///     RouteDescriptor::new("success", Verb::Get, "/response", "/success");
/// assert_eq!(SUCCESS.template(), "/response/success");
/// assert_eq!(SUCCESS.to_string(), "[GET] /response/success");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteDescriptor {
    /// Handler operation name.
    pub operation: &'static str,
    /// HTTP verb.
    pub verb: Verb,
    /// Scope-level path fragment.
    pub scope: &'static str,
    /// Handler-level path fragment.
    pub path: &'static str,
}

impl RouteDescriptor {
    /// Describe a route.
    #[must_use]
    pub const fn new(
        operation: &'static str,
        verb: Verb,
        scope: &'static str,
        path: &'static str,
    ) -> Self {
        Self {
            operation,
            verb,
            scope,
            path,
        }
    }

    /// Full path template: the scope fragment followed by the handler fragment.
    #[must_use]
    pub fn template(&self) -> String {
        format!("{}{}", self.scope, self.path)
    }

    /// Route guarded by this descriptor's verb.
    #[must_use]
    pub fn route(&self) -> Route {
        web::method(self.verb.method())
    }

    /// Resource for this descriptor's path; unsupported methods reach
    /// [`fallback`].
    #[must_use]
    pub fn resource(&self) -> Resource {
        web::resource(self.template())
            .name(self.operation)
            .default_service(web::to(fallback))
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}{}", self.verb, self.scope, self.path)
    }
}

/// Immutable set of registered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(RouteDescriptor, ResourceDef)>,
}

impl RouteTable {
    /// Build the table from descriptors.
    pub fn new(descriptors: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        let entries = descriptors
            .into_iter()
            .map(|descriptor| {
                let definition = ResourceDef::new(descriptor.template());
                (descriptor, definition)
            })
            .collect();
        Self { entries }
    }

    /// Registered descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.entries.iter().map(|(descriptor, _)| descriptor)
    }

    /// Descriptor serving `method` on `path`, if any.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&RouteDescriptor> {
        self.entries
            .iter()
            .find(|(descriptor, definition)| {
                descriptor.verb.matches(method) && definition.is_match(path)
            })
            .map(|(descriptor, _)| descriptor)
    }

    /// Whether any registered route serves `path`, whatever the method.
    pub fn knows_path(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, definition)| definition.is_match(path))
    }

    /// Failure for a request no registered route accepted.
    ///
    /// A known path with the wrong method is a method failure; anything else
    /// is a missing route.
    pub fn unmatched(&self, method: &Method, path: &str) -> Error {
        if self.knows_path(path) {
            Error::method_not_allowed(method.as_str(), path)
        } else {
            Error::not_found(path)
        }
    }

    /// Log label for a request: the descriptor when one serves it, otherwise
    /// the raw method and path.
    pub fn label(&self, method: &Method, path: &str) -> RouteLabel {
        match self.resolve(method, path) {
            Some(descriptor) => RouteLabel {
                operation: descriptor.operation,
                route: descriptor.to_string(),
            },
            None => RouteLabel {
                operation: UNMATCHED_OPERATION,
                route: format!("[{method}] {path}"),
            },
        }
    }
}

/// Operation name logged for requests no descriptor serves.
pub const UNMATCHED_OPERATION: &str = "unmatched";

/// Route identity written to request logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLabel {
    /// Operation name, or [`UNMATCHED_OPERATION`].
    pub operation: &'static str,
    /// Rendered route, e.g. `[GET] /response/success`.
    pub route: String,
}

/// Default service for unmatched requests.
///
/// Registered both per resource (wrong method) and on the application (no
/// resource at all).
pub async fn fallback(req: HttpRequest) -> ApiResult<HttpResponse> {
    let error = match req.app_data::<web::Data<RouteTable>>() {
        Some(routes) => routes.unmatched(req.method(), req.path()),
        None => Error::not_found(req.path()),
    };
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const SUCCESS: RouteDescriptor =
        RouteDescriptor::new("success", Verb::Get, "/response", "/success");
    const ITEM: RouteDescriptor =
        RouteDescriptor::new("item", Verb::Get, "/response", "/items/{id}");
    const ECHO: RouteDescriptor = RouteDescriptor::new("echo", Verb::Post, "/response", "/echo");

    #[fixture]
    fn table() -> RouteTable {
        RouteTable::new([SUCCESS, ITEM, ECHO])
    }

    #[rstest]
    #[case(SUCCESS, "[GET] /response/success")]
    #[case(ITEM, "[GET] /response/items/{id}")]
    #[case(ECHO, "[POST] /response/echo")]
    fn descriptor_renders_verb_and_joined_path(
        #[case] descriptor: RouteDescriptor,
        #[case] expected: &str,
    ) {
        assert_eq!(descriptor.to_string(), expected);
    }

    #[rstest]
    fn resolve_matches_templates(table: RouteTable) {
        let resolved = table.resolve(&Method::GET, "/response/items/42");
        assert_eq!(resolved, Some(&ITEM));
        assert!(table.resolve(&Method::GET, "/response/echo").is_none());
    }

    #[rstest]
    fn unmatched_distinguishes_method_from_path(table: RouteTable) {
        assert_eq!(
            table.unmatched(&Method::DELETE, "/response/success"),
            Error::method_not_allowed("DELETE", "/response/success")
        );
        assert_eq!(
            table.unmatched(&Method::GET, "/nowhere"),
            Error::not_found("/nowhere")
        );
    }

    #[rstest]
    fn label_falls_back_to_raw_request(table: RouteTable) {
        let known = table.label(&Method::POST, "/response/echo");
        assert_eq!(known.operation, "echo");
        assert_eq!(known.route, "[POST] /response/echo");

        let unknown = table.label(&Method::PUT, "/nowhere");
        assert_eq!(unknown.operation, UNMATCHED_OPERATION);
        assert_eq!(unknown.route, "[PUT] /nowhere");
    }

    #[rstest]
    fn descriptors_keep_registration_order(table: RouteTable) {
        let operations: Vec<_> = table.descriptors().map(|d| d.operation).collect();
        assert_eq!(operations, ["success", "item", "echo"]);
    }
}
