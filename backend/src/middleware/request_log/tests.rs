//! Tests for the request logging middleware.

use super::*;
use crate::domain::{ApiResult, Error, ErrorCatalog};
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::routes::{RouteDescriptor, Verb, fallback};
use crate::middleware::record_param;
use crate::test_support::{LogRecord, RecordingRequestLog};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test};
use rstest::rstest;
use serde_json::json;

const HELLO: RouteDescriptor = RouteDescriptor::new("hello", Verb::Get, "/demo", "/hello/{id}");
const REJECT: RouteDescriptor = RouteDescriptor::new("reject", Verb::Get, "/demo", "/reject");

async fn hello(req: HttpRequest, id: web::Path<String>) -> ApiResponse<Value> {
    record_param(&req, "note", json!("from handler"));
    ApiResponse::success(json!({ "id": id.into_inner() }))
}

async fn reject() -> ApiResult<HttpResponse> {
    Err(Error::rejected(ErrorCatalog::TokenExpired))
}

fn routes() -> Arc<RouteTable> {
    Arc::new(RouteTable::new([HELLO, REJECT]))
}

async fn call(
    sink: Arc<RecordingRequestLog>,
    req: actix_test::TestRequest,
) -> ServiceResponse {
    let routes = routes();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&routes)))
            .service(HELLO.resource().route(HELLO.route().to(hello)))
            .service(REJECT.resource().route(REJECT.route().to(reject)))
            .default_service(web::to(fallback))
            .wrap(RequestLog::new(routes).with_sink(sink)),
    )
    .await;
    actix_test::call_service(&app, req.to_request()).await
}

#[actix_web::test]
async fn success_emits_one_start_and_one_end_record() {
    let sink = RecordingRequestLog::shared();
    let res = call(
        Arc::clone(&sink),
        actix_test::TestRequest::get().uri("/demo/hello/7?lang=en"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let records = sink.records();
    assert_eq!(records.len(), 2);
    let (LogRecord::Started(started), LogRecord::Finished(finished)) = (&records[0], &records[1])
    else {
        panic!("expected start then end record, got {records:?}");
    };
    assert_eq!(started.operation, "hello");
    assert_eq!(started.route, "[GET] /demo/hello/{id}");
    assert_eq!(finished.trace_id, started.trace_id);
    assert_eq!(finished.status, 200);
    assert_eq!(finished.result, Some(json!({ "id": "7" })));
    assert!(finished.failure.is_none());
    assert_eq!(
        finished.params.to_value(),
        json!({ "id": "7", "lang": "en", "note": "from handler" })
    );
}

#[actix_web::test]
async fn failure_is_recorded_without_a_result() {
    let sink = RecordingRequestLog::shared();
    let res = call(Arc::clone(&sink), actix_test::TestRequest::get().uri("/demo/reject")).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let finished = sink.finished_records();
    assert_eq!(finished.len(), 1);
    let record = &finished[0];
    assert_eq!(record.operation, "reject");
    assert_eq!(record.status, 401);
    assert!(record.result.is_none());
    assert!(record.failure.is_some());
}

#[actix_web::test]
async fn service_errors_are_recorded_and_propagated() {
    let sink = RecordingRequestLog::shared();
    let inner = actix_web::dev::fn_service(|_req: ServiceRequest| async {
        Err::<ServiceResponse, actix_web::Error>(actix_web::error::ErrorBadGateway("upstream down"))
    });
    let middleware = RequestLog::new(routes())
        .with_sink(Arc::<RecordingRequestLog>::clone(&sink))
        .new_transform(inner)
        .await
        .expect("middleware builds");

    let req = actix_test::TestRequest::get()
        .uri("/demo/hello/3?lang=fr")
        .to_srv_request();
    let Err(err) = middleware.call(req).await else {
        panic!("inner service error should propagate");
    };
    assert_eq!(err.to_string(), "upstream down");

    let started = sink.started_records();
    let finished = sink.finished_records();
    assert_eq!(started.len(), 1);
    assert_eq!(finished.len(), 1);
    let record = &finished[0];
    assert_eq!(record.trace_id, started[0].trace_id);
    assert_eq!(record.operation, "hello");
    assert_eq!(record.status, 502);
    assert!(record.result.is_none());
    assert_eq!(record.failure.as_deref(), Some("upstream down"));
    assert_eq!(record.params.to_value(), json!({ "lang": "fr" }));
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/nowhere"), "[GET] /nowhere", 404)]
#[case(actix_test::TestRequest::delete().uri("/demo/reject"), "[DELETE] /demo/reject", 405)]
#[actix_web::test]
async fn unmatched_requests_are_labelled_with_the_raw_route(
    #[case] req: actix_test::TestRequest,
    #[case] route: &str,
    #[case] status: u16,
) {
    let sink = RecordingRequestLog::shared();
    let res = call(Arc::clone(&sink), req).await;
    assert_eq!(res.status().as_u16(), status);

    let started = sink.started_records();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].route, route);
    assert_eq!(started[0].operation, crate::inbound::http::routes::UNMATCHED_OPERATION);
    assert_eq!(sink.finished_records().len(), 1);
}

#[actix_web::test]
async fn trace_id_header_is_echoed_when_supplied() {
    let sink = RecordingRequestLog::shared();
    let res = call(
        Arc::clone(&sink),
        actix_test::TestRequest::get()
            .uri("/demo/hello/1")
            .insert_header((TRACE_ID_HEADER, "00000000-0000-0000-0000-00000000000a")),
    )
    .await;
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some("00000000-0000-0000-0000-00000000000a"));
    assert_eq!(
        sink.started_records()[0].trace_id.to_string(),
        "00000000-0000-0000-0000-00000000000a"
    );
}

#[rstest]
#[case("", json!({}))]
#[case("a=1&b=two", json!({ "a": "1", "b": "two" }))]
#[case("name=caf%C3%A9", json!({ "name": "café" }))]
fn query_pairs_become_string_params(#[case] query: &str, #[case] expected: Value) {
    assert_eq!(query_params(query).to_value(), expected);
}
