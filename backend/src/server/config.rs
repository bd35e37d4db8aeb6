//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::middleware::RequestLogSink;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) docs_enabled: bool,
    pub(crate) request_log: Option<Arc<dyn RequestLogSink>>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` with docs off.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            docs_enabled: false,
            request_log: None,
        }
    }

    /// Serve Swagger UI and the grouped API documents.
    #[must_use]
    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Send request log records to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_request_log_sink(mut self, sink: Arc<dyn RequestLogSink>) -> Self {
        self.request_log = Some(sink);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether documentation routes are mounted.
    #[must_use]
    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled
    }
}
