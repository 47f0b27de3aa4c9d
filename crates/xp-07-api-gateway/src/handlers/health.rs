//! Health routes.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use xp_01_protocol_adapters::ProtocolHealth;

use crate::router::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every adapter is healthy, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub protocols: BTreeMap<String, ProtocolHealth>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let protocols = state.engine.bridges().get_health();
    let status = if protocols.values().all(|h| h.is_healthy) {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        version: crate::VERSION,
        protocols,
    })
}

/// Reset every adapter's health counters.
pub async fn reset_health(State(state): State<AppState>) -> Json<Value> {
    state.engine.bridges().clear_health_cache();
    Json(json!({"status": "reset"}))
}
