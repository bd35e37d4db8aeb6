//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOILERPLATE_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid bind host `{host}`: {reason}")]
    InvalidHost { host: String, reason: String },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOILERPLATE")]
pub struct ServerSettings {
    /// Address the listener binds to.
    pub host: Option<String>,
    /// Port the listener binds to.
    pub port: Option<u16>,
    /// Serve Swagger UI and the grouped API documents; on in debug builds.
    #[ortho_config(default = cfg!(debug_assertions))]
    pub docs_enabled: bool,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                reason: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}
