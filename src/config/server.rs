//! HTTP listener and logging settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Upper bound for the per-request timeout; IPN callbacks and pay-page
/// redirects never legitimately take longer.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener and logging settings (`MOOLAH_GATEWAY__SERVER__*`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub log_level: String,
    /// JSON log lines instead of the human-readable format.
    pub log_json: bool,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Address to bind. A `host` that is not an IP literal binds all interfaces.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Log filter built from `log_level`.
    pub fn log_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.log_filter().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info,moolah_gateway=debug".to_string(),
            log_json: false,
            request_timeout_secs: 30,
        }
    }
}
