//! Gateway configuration with validation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::error::GatewayError;

/// HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Bearer token for `/admin/*`. Empty disables the check (development only).
    pub admin_token: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            admin_token: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl GatewayConfig {
    /// Listen address.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.request_timeout.is_zero() {
            return Err(GatewayError::Config(
                "request_timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
