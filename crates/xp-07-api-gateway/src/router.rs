//! Route table and shared handler state.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use xp_04_purchase_engine::PurchaseEngine;
use xp_05_event_ingestion::WebhookIngestor;
use xp_06_status_poller::StatusService;

use crate::domain::GatewayConfig;
use crate::handlers::{
    create_intent, get_intent, get_status, health, list_intents, receive_webhook, reset_health,
};
use crate::middleware::require_admin;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: PurchaseEngine,
    pub status: StatusService,
    pub ingestor: Arc<dyn WebhookIngestor>,
    pub admin_token: Arc<str>,
}

/// Build the HTTP router.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let admin = Router::new()
        .route("/admin/health/reset", post(reset_health))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout));

    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/status/:id", get(get_status))
        .route("/intents", post(create_intent).get(list_intents))
        .route("/intents/:id", get(get_intent))
        .route("/health", get(health))
        .merge(admin)
        .layer(middleware)
        .with_state(state)
}
