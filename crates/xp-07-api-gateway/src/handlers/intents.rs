//! `/intents` routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shared_types::{Intent, IntentRequest};
use tracing::info;
use xp_04_purchase_engine::IntentProcessor;

use crate::domain::GatewayError;
use crate::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub address: Option<String>,
}

/// Create an intent and start processing it in the background.
pub async fn create_intent(
    State(state): State<AppState>,
    payload: Result<Json<IntentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Intent>), GatewayError> {
    let Json(request) = payload.map_err(|e| GatewayError::bad_request(e.body_text()))?;
    let intent = state.engine.process_request(request).await?;
    info!(
        intent_id = %intent.id,
        source = %intent.source_chain,
        amount = %intent.amount,
        "[xp-07] Intent accepted"
    );
    Ok((StatusCode::ACCEPTED, Json(intent)))
}

pub async fn get_intent(
    State(state): State<AppState>,
    Path(intent_id): Path<String>,
) -> Result<Json<Intent>, GatewayError> {
    Ok(Json(state.engine.get_intent(&intent_id).await?))
}

/// Intents where `address` is the source or destination, newest first.
pub async fn list_intents(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Intent>>, GatewayError> {
    let address = query
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| GatewayError::bad_request("address query parameter is required"))?;
    Ok(Json(state.engine.list_intents(address).await))
}
