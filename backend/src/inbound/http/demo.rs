//! Demonstration endpoints under `/response`.
//!
//! `success` and `fail` show the two envelope shapes. The remaining handlers
//! each exercise one failure path of the mapper: missing header, missing query
//! parameter, malformed or incomplete JSON body, invalid argument and absent
//! record.

use actix_web::{HttpRequest, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ApiResult, Error, ErrorCatalog, RequireValue};
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::extract::{LoggedJson, required_header};
use crate::inbound::http::routes::{RouteDescriptor, Verb};
use crate::middleware::LogFields;

/// Scope shared by every demo route.
pub const SCOPE: &str = "/response";

pub const SUCCESS: RouteDescriptor = RouteDescriptor::new("success", Verb::Get, SCOPE, "/success");
pub const FAIL: RouteDescriptor = RouteDescriptor::new("fail", Verb::Get, SCOPE, "/fail");
pub const GREETING: RouteDescriptor =
    RouteDescriptor::new("greeting", Verb::Get, SCOPE, "/greeting");
pub const ECHO: RouteDescriptor = RouteDescriptor::new("echo", Verb::Post, SCOPE, "/echo");
pub const ITEM: RouteDescriptor = RouteDescriptor::new("item", Verb::Get, SCOPE, "/items/{id}");

/// Every demo route, in registration order.
pub const ROUTES: [RouteDescriptor; 5] = [SUCCESS, FAIL, GREETING, ECHO, ITEM];

/// Header identifying the caller of [`greeting`].
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// Sample record returned by the demo endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SampleDto {
    #[schema(example = "testA")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i32,
}

impl SampleDto {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl LogFields for SampleDto {
    fn log_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("name", json!(self.name)), ("age", json!(self.age))]
    }
}

/// Query accepted by [`greeting`].
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GreetingQuery {
    /// Name to greet.
    pub name: String,
}

/// Greeting payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    #[schema(example = "Hello, ada")]
    pub message: String,
    #[schema(example = "client-7")]
    pub client_id: String,
}

const STORED_ITEMS: [(u64, &str, i32); 2] = [(1, "testA", 30), (2, "testB", 25)];

fn stored_item(id: u64) -> Option<SampleDto> {
    STORED_ITEMS
        .iter()
        .find(|(stored, _, _)| *stored == id)
        .map(|(_, name, age)| SampleDto::new(*name, *age))
}

/// Register the demo routes.
///
/// Each resource comes from its [`RouteDescriptor`] so unsupported methods on
/// these paths map to `BAD_REQUEST_METHOD`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(SUCCESS.resource().route(SUCCESS.route().to(success)))
        .service(FAIL.resource().route(FAIL.route().to(fail)))
        .service(GREETING.resource().route(GREETING.route().to(greeting)))
        .service(ECHO.resource().route(ECHO.route().to(echo)))
        .service(ITEM.resource().route(ITEM.route().to(item)));
}

/// Always succeeds with the sample record.
#[utoipa::path(
    get,
    path = "/response/success",
    responses(
        (status = 200, description = "Sample record", body = crate::inbound::http::schemas::SampleEnvelope)
    ),
    tags = ["response"],
    operation_id = "success"
)]
pub async fn success() -> ApiResponse<SampleDto> {
    ApiResponse::success(SampleDto::new("testA", 30))
}

/// Always fails with `BAD_REQUEST`.
#[utoipa::path(
    get,
    path = "/response/fail",
    responses(
        (status = 400, description = "Bad request", body = crate::inbound::http::schemas::FailEnvelope)
    ),
    tags = ["response"],
    operation_id = "fail"
)]
pub async fn fail() -> ApiResult<ApiResponse<SampleDto>> {
    Err(Error::rejected(ErrorCatalog::BadRequest))
}

/// Greets `name` on behalf of the client named in `X-Client-Id`.
#[utoipa::path(
    get,
    path = "/response/greeting",
    params(
        GreetingQuery,
        ("X-Client-Id" = String, Header, description = "Calling client")
    ),
    responses(
        (status = 200, description = "Greeting", body = crate::inbound::http::schemas::GreetingEnvelope),
        (status = 400, description = "Missing header or parameter", body = crate::inbound::http::schemas::FailEnvelope)
    ),
    tags = ["response"],
    operation_id = "greeting"
)]
pub async fn greeting(
    req: HttpRequest,
    query: web::Query<GreetingQuery>,
) -> ApiResult<ApiResponse<Greeting>> {
    let client_id = required_header(&req, CLIENT_ID_HEADER)?;
    let GreetingQuery { name } = query.into_inner();
    Ok(ApiResponse::success(Greeting {
        message: format!("Hello, {name}"),
        client_id,
    }))
}

/// Echoes a sample record back with `201 Created`.
#[utoipa::path(
    post,
    path = "/response/echo",
    request_body = SampleDto,
    responses(
        (status = 201, description = "Echoed record", body = crate::inbound::http::schemas::SampleEnvelope),
        (status = 400, description = "Malformed, incomplete or invalid body", body = crate::inbound::http::schemas::FailEnvelope)
    ),
    tags = ["response"],
    operation_id = "echo"
)]
pub async fn echo(body: LoggedJson<SampleDto>) -> ApiResult<ApiResponse<SampleDto>> {
    let sample = body.into_inner();
    if sample.age < 0 {
        return Err(Error::illegal_argument(format!(
            "age must be non-negative, got {}",
            sample.age
        )));
    }
    Ok(ApiResponse::success_with(StatusCode::CREATED, sample))
}

/// Looks up a stored sample record.
#[utoipa::path(
    get,
    path = "/response/items/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Stored record", body = crate::inbound::http::schemas::SampleEnvelope),
        (status = 400, description = "Non-numeric identifier", body = crate::inbound::http::schemas::FailEnvelope),
        (status = 500, description = "No record stored under the identifier", body = crate::inbound::http::schemas::FailEnvelope)
    ),
    tags = ["response"],
    operation_id = "item"
)]
pub async fn item(id: web::Path<u64>) -> ApiResult<ApiResponse<SampleDto>> {
    let id = id.into_inner();
    let record = stored_item(id).required(&format!("item {id}"))?;
    Ok(ApiResponse::success(record))
}
