//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::doc::GROUPS;
use crate::inbound::http::demo;
use crate::inbound::http::error::enveloped_failures;
use crate::inbound::http::extract::{json_config, path_config, query_config};
use crate::inbound::http::routes::{RouteTable, fallback};
use crate::middleware::{RequestLog, RequestLogSink, TracingRequestLog};

/// Route serving Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui/{_:.*}";

/// State shared by every worker's application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub routes: Arc<RouteTable>,
    pub request_log: Arc<dyn RequestLogSink>,
    pub docs_enabled: bool,
}

impl AppDependencies {
    /// Demo routes logged through `tracing`.
    pub fn new(docs_enabled: bool) -> Self {
        Self {
            routes: Arc::new(RouteTable::new(demo::ROUTES)),
            request_log: Arc::new(TracingRequestLog),
            docs_enabled,
        }
    }

    /// Replace the request log sink.
    #[must_use]
    pub fn with_request_log(mut self, sink: Arc<dyn RequestLogSink>) -> Self {
        self.request_log = sink;
        self
    }
}

fn swagger_ui() -> SwaggerUi {
    let urls = GROUPS
        .iter()
        .map(|group| (Url::new(group.name, group.url), group.document()))
        .collect();
    SwaggerUi::new(SWAGGER_UI_PATH).urls(urls)
}

/// Assemble the application: extractor configuration, demo routes, optional
/// documentation, the unmatched-route fallback, failure envelopes for bare
/// error responses and the request logger.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        routes,
        request_log,
        docs_enabled,
    } = deps;

    let mut app = App::new()
        .app_data(web::Data::from(Arc::clone(&routes)))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(demo::configure);

    if docs_enabled {
        app = app.service(swagger_ui());
    }

    app.default_service(web::to(fallback))
        .wrap(enveloped_failures())
        .wrap(RequestLog::new(routes).with_sink(request_log))
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        docs_enabled,
        request_log,
    } = config;

    let mut deps = AppDependencies::new(docs_enabled);
    if let Some(sink) = request_log {
        deps = deps.with_request_log(sink);
    }

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, docs_enabled, "server listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(true, StatusCode::OK)]
    #[case(false, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn docs_are_mounted_only_when_enabled(#[case] enabled: bool, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(AppDependencies::new(enabled))).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api-docs/all.json").to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn unknown_paths_render_the_not_found_envelope() {
        let app = actix_test::init_service(build_app(AppDependencies::new(false))).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/missing").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["payload"]["errorCode"], "ERR_CLIENT_001");
    }

    #[actix_web::test]
    async fn missing_swagger_assets_render_the_not_found_envelope() {
        let app = actix_test::init_service(build_app(AppDependencies::new(true))).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/swagger-ui/definitely-missing.js")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["payload"]["errorCode"], "ERR_CLIENT_001");
    }

    #[test]
    fn config_builder_records_choices() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("socket address")).with_docs(true);
        assert!(config.docs_enabled());
        assert_eq!(config.bind_addr().ip().to_string(), "127.0.0.1");
    }
}
