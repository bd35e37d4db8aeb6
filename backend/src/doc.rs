//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the demonstration endpoints under `/response`
//! - **Schemas**: concrete envelope wrappers plus the shared error payload
//! - **Security**: `AccessToken` and `RefreshToken` header keys, both required
//! - **Responses**: fixed 400/401/404/500 descriptions on every operation
//!
//! [`DocGroup`]s split the document by path prefix. Swagger UI serves one
//! document per group and `cargo run --bin openapi-dump` prints them for
//! external tooling.

use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{RefOr, Response};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::envelope::{ErrorPayload, ResponseStatus};
use crate::inbound::http::schemas::{FailEnvelope, GreetingEnvelope, SampleEnvelope};

/// Security scheme name for the access token header.
pub const ACCESS_TOKEN_SCHEME: &str = "AccessToken";
/// Security scheme name for the refresh token header.
pub const REFRESH_TOKEN_SCHEME: &str = "RefreshToken";
/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "Authorization";
/// Header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "Authorization-Refresh";

/// Register both token headers and require them together on every operation.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            ACCESS_TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                ACCESS_TOKEN_HEADER,
                "JWT access token, sent as `Bearer <token>`.",
            ))),
        );
        components.add_security_scheme(
            REFRESH_TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                REFRESH_TOKEN_HEADER,
                "JWT refresh token, sent as `Bearer <token>`.",
            ))),
        );

        let requirement = SecurityRequirement::new(ACCESS_TOKEN_SCHEME, Vec::<String>::new())
            .add(REFRESH_TOKEN_SCHEME, Vec::<String>::new());
        openapi.security = Some(vec![requirement]);
    }
}

/// Status codes documented on every operation, with their fixed descriptions.
pub const STANDARD_RESPONSES: [(&str, &str); 4] = [
    ("400", "Bad Request"),
    ("401", "Token Error"),
    ("404", "Not Found"),
    ("500", "Server Error"),
];

/// Apply [`STANDARD_RESPONSES`] to every operation.
///
/// Responses an operation already documents keep their body but take the
/// fixed description; other responses, such as 200, are left alone.
struct StandardResponses;

impl Modify for StandardResponses {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for item in openapi.paths.paths.values_mut() {
            for operation in operations_mut(item) {
                for (status, description) in STANDARD_RESPONSES {
                    let response = operation
                        .responses
                        .responses
                        .entry(status.to_owned())
                        .or_insert_with(|| RefOr::T(Response::new(description)));
                    if let RefOr::T(response) = response {
                        description.clone_into(&mut response.description);
                    }
                }
            }
        }
    }
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.options,
        &mut item.head,
        &mut item.patch,
        &mut item.trace,
    ]
    .into_iter()
    .flatten()
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon, &StandardResponses),
    info(
        title = "Boilerplate API",
        description = "Response envelope, error catalog and request logging conventions \
                       demonstrated over a handful of sample endpoints.",
        version = "1.0.0"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::inbound::http::demo::success,
        crate::inbound::http::demo::fail,
        crate::inbound::http::demo::greeting,
        crate::inbound::http::demo::echo,
        crate::inbound::http::demo::item,
    ),
    components(schemas(
        SampleEnvelope,
        GreetingEnvelope,
        FailEnvelope,
        ErrorPayload,
        ResponseStatus
    )),
    tags(
        (name = "response", description = "Envelope and failure mapping demonstrations")
    )
)]
pub struct ApiDoc;

/// A named slice of the API document selected by path patterns.
///
/// Patterns are literal paths or prefixes ending in `/**`, which match the
/// prefix itself and everything below it.
///
/// # Examples
/// ```
/// use boilerplate::doc::{ALL_GROUP, MAIN_GROUP};
///
/// assert!(ALL_GROUP.matches("/response/success"));
/// assert!(MAIN_GROUP.matches("/auth/login"));
/// assert!(!MAIN_GROUP.matches("/response/success"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocGroup {
    /// Display name shown in Swagger UI.
    pub name: &'static str,
    /// Route serving the group's JSON document.
    pub url: &'static str,
    pub patterns: &'static [&'static str],
}

/// Every documented path.
pub const ALL_GROUP: DocGroup = DocGroup {
    name: "All",
    url: "/api-docs/all.json",
    patterns: &["/**"],
};

/// Product-facing paths.
pub const MAIN_GROUP: DocGroup = DocGroup {
    name: "Main",
    url: "/api-docs/main.json",
    patterns: &[
        "/auth/**",
        "/deposit/**",
        "/withdraw/**",
        "/info/**",
        "/games/**",
        "/gnb/**",
        "/inquiry/**",
        "/message/**",
    ],
};

/// Groups served by Swagger UI, in display order.
pub const GROUPS: [DocGroup; 2] = [ALL_GROUP, MAIN_GROUP];

impl DocGroup {
    /// Group whose name matches `name`, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<Self> {
        GROUPS
            .into_iter()
            .find(|group| group.name.eq_ignore_ascii_case(name))
    }

    /// Whether `path` belongs to this group.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, path))
    }

    /// The API document restricted to this group's paths.
    pub fn document(&self) -> utoipa::openapi::OpenApi {
        let mut doc = ApiDoc::openapi();
        doc.paths.paths.retain(|path, _| self.matches(path));
        doc
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some("") => true,
        Some(prefix) => path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        None => pattern == path,
    }
}

#[cfg(test)]
mod tests {
    //! Tests verifying document metadata and group filtering.
    //!
    //! Served documents are covered by the BDD tests in
    //! `backend/tests/openapi_docs_bdd.rs`.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::security::SecurityScheme;

    #[test]
    fn info_and_server_are_fixed() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Boilerplate API");
        assert_eq!(doc.info.version, "1.0.0");
        let servers = doc.servers.expect("servers");
        assert_eq!(servers[0].url, "http://localhost:8080");
    }

    #[rstest]
    #[case(ACCESS_TOKEN_SCHEME, ACCESS_TOKEN_HEADER)]
    #[case(REFRESH_TOKEN_SCHEME, REFRESH_TOKEN_HEADER)]
    fn token_schemes_are_header_keys(#[case] scheme: &str, #[case] header: &str) {
        let doc = ApiDoc::openapi();
        let schemes = &doc.components.as_ref().expect("components").security_schemes;
        let value = serde_json::to_value(schemes.get(scheme).expect("scheme registered"))
            .expect("serialise scheme");
        assert_eq!(value["type"], "apiKey");
        assert_eq!(value["in"], "header");
        assert_eq!(value["name"], header);
        assert!(matches!(
            schemes.get(scheme),
            Some(SecurityScheme::ApiKey(_))
        ));
    }

    #[test]
    fn both_tokens_are_required_together() {
        let doc = ApiDoc::openapi();
        let security = serde_json::to_value(doc.security.expect("security")).expect("serialise");
        assert_eq!(
            security,
            serde_json::json!([{ "AccessToken": [], "RefreshToken": [] }])
        );
    }

    #[test]
    fn every_operation_carries_the_standard_responses() {
        let doc = ApiDoc::openapi();
        let mut operations = 0;
        for item in doc.paths.paths.into_values() {
            let mut item = item;
            for operation in operations_mut(&mut item) {
                operations += 1;
                for (status, description) in STANDARD_RESPONSES {
                    match operation.responses.responses.get(status) {
                        Some(RefOr::T(response)) => assert_eq!(response.description, description),
                        _ => panic!("missing {status} response"),
                    }
                }
            }
        }
        assert_eq!(operations, 5);
    }

    #[test]
    fn documented_success_responses_are_kept() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/response/success").expect("success path");
        let operation = item.get.as_ref().expect("GET operation");
        assert!(operation.responses.responses.contains_key("200"));
    }

    #[rstest]
    #[case("/**", "/anything/at/all", true)]
    #[case("/auth/**", "/auth", true)]
    #[case("/auth/**", "/auth/login", true)]
    #[case("/auth/**", "/authority", false)]
    #[case("/games/**", "/response/games", false)]
    #[case("/info", "/info", true)]
    #[case("/info", "/info/me", false)]
    fn patterns_follow_prefix_semantics(
        #[case] pattern: &str,
        #[case] path: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(pattern_matches(pattern, path), expected);
    }

    #[test]
    fn group_documents_keep_only_matching_paths() {
        let all = ALL_GROUP.document();
        assert_eq!(all.paths.paths.len(), 5);
        let main = MAIN_GROUP.document();
        assert!(main.paths.paths.is_empty());
        assert!(main.components.is_some());
    }

    #[rstest]
    #[case("all", Some(ALL_GROUP))]
    #[case("MAIN", Some(MAIN_GROUP))]
    #[case("admin", None)]
    fn groups_resolve_by_name(#[case] name: &str, #[case] expected: Option<DocGroup>) {
        assert_eq!(DocGroup::by_name(name), expected);
    }
}
