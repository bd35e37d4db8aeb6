//! Request logging middleware.
//!
//! [`RequestLog`] wraps every inbound call. Before delegating it emits one
//! start record naming the route; once the inner service settles it emits one
//! end record with the captured parameters, the serialised result payload,
//! the HTTP status and the elapsed wall-clock time. Failures are recorded and
//! then passed through untouched.
//!
//! Each request also receives a [`TraceId`], kept in task-local scope while
//! the request runs and echoed back in the `trace-id` response header.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;
use tracing::{error, info};

use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::routes::RouteTable;

use super::log_fields::{CapturedParams, LoggedResult};
use super::trace::TraceId;

/// Record emitted before the handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStarted {
    pub trace_id: TraceId,
    pub operation: &'static str,
    /// Rendered route, e.g. `[GET] /response/success`.
    pub route: String,
}

/// Record emitted once the handler has produced a response or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFinished {
    pub trace_id: TraceId,
    pub operation: &'static str,
    pub route: String,
    /// Query pairs, path segments and extractor-recorded fields.
    pub params: CapturedParams,
    /// Serialised payload; `None` when the call failed.
    pub result: Option<Value>,
    pub status: u16,
    /// Rendered failure when the call failed.
    pub failure: Option<String>,
    pub elapsed_ms: u64,
}

/// Destination for request log records.
pub trait RequestLogSink: Send + Sync {
    fn started(&self, record: &RequestStarted);
    fn finished(&self, record: &RequestFinished);
}

/// Sink writing records as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestLog;

impl RequestLogSink for TracingRequestLog {
    fn started(&self, record: &RequestStarted) {
        info!(
            trace_id = %record.trace_id,
            operation = record.operation,
            route = %record.route,
            "request started"
        );
    }

    fn finished(&self, record: &RequestFinished) {
        let result = record
            .result
            .as_ref()
            .map_or_else(|| "none".to_owned(), Value::to_string);
        info!(
            trace_id = %record.trace_id,
            operation = record.operation,
            route = %record.route,
            params = %record.params.to_value(),
            result = %result,
            status = record.status,
            failure = record.failure.as_deref(),
            elapsed_ms = record.elapsed_ms,
            "request finished"
        );
    }
}

/// Middleware factory logging each request against the route table.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use boilerplate::inbound::http::routes::RouteTable;
/// use boilerplate::middleware::RequestLog;
///
/// let routes = Arc::new(RouteTable::default());
/// let _app = App::new().wrap(RequestLog::new(routes));
/// ```
#[derive(Clone)]
pub struct RequestLog {
    routes: Arc<RouteTable>,
    sink: Arc<dyn RequestLogSink>,
}

impl RequestLog {
    /// Log through [`TracingRequestLog`].
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            routes,
            sink: Arc::new(TracingRequestLog),
        }
    }

    /// Replace the record sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn RequestLogSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware {
            service,
            routes: Arc::clone(&self.routes),
            sink: Arc::clone(&self.sink),
        }))
    }
}

/// Service wrapper produced by [`RequestLog`].
pub struct RequestLogMiddleware<S> {
    service: S,
    routes: Arc<RouteTable>,
    sink: Arc<dyn RequestLogSink>,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::from_headers_or_generate(req.headers());
        let started_at = Instant::now();
        let label = self.routes.label(req.method(), req.path());
        let query = query_params(req.query_string());
        self.sink.started(&RequestStarted {
            trace_id,
            operation: label.operation,
            route: label.route.clone(),
        });

        let sink = Arc::clone(&self.sink);
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            match fut.await {
                Ok(mut res) => {
                    let mut params = query;
                    params.merge(&request_params(res.request()));
                    let response = res.response();
                    let failure = response.error().map(ToString::to_string);
                    let result = if failure.is_some() {
                        None
                    } else {
                        response
                            .extensions()
                            .get::<LoggedResult>()
                            .map(|logged| logged.0.clone())
                    };
                    sink.finished(&RequestFinished {
                        trace_id,
                        operation: label.operation,
                        route: label.route,
                        params,
                        result,
                        status: res.status().as_u16(),
                        failure,
                        elapsed_ms: elapsed_ms(started_at),
                    });
                    attach_trace_header(&mut res, trace_id);
                    Ok(res)
                }
                Err(err) => {
                    sink.finished(&RequestFinished {
                        trace_id,
                        operation: label.operation,
                        route: label.route,
                        params: query,
                        result: None,
                        status: err.as_response_error().status_code().as_u16(),
                        failure: Some(err.to_string()),
                        elapsed_ms: elapsed_ms(started_at),
                    });
                    Err(err)
                }
            }
        }))
    }
}

fn query_params(query: &str) -> CapturedParams {
    web::Query::<BTreeMap<String, String>>::from_query(query)
        .map(|pairs| {
            pairs
                .into_inner()
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect()
        })
        .unwrap_or_default()
}

/// Matched path segments followed by extractor-recorded fields.
fn request_params(req: &HttpRequest) -> CapturedParams {
    let mut params: CapturedParams = req
        .match_info()
        .iter()
        .map(|(name, value)| (name, Value::String(value.to_owned())))
        .collect();
    if let Some(captured) = req.extensions().get::<CapturedParams>() {
        params.merge(captured);
    }
    params
}

fn elapsed_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn attach_trace_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(
                %error,
                trace_id = %trace_id,
                "failed to encode trace identifier header"
            );
        }
    }
}

#[cfg(test)]
mod tests;
