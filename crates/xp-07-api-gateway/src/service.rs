//! API gateway service - binds and serves the router.

use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::domain::{GatewayConfig, GatewayError};
use crate::router::{build_router, AppState};

/// HTTP gateway.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl GatewayService {
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Router with all routes and layers.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Server(format!("bind {}: {}", addr, e)))
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Server(e.to_string()))?;
        info!(addr = %addr, "[xp-07] API gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("[xp-07] API gateway stopped");
        Ok(())
    }
}
