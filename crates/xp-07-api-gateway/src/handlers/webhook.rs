//! `POST /webhook`

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;
use xp_05_event_ingestion::IngestError;

use crate::domain::GatewayError;
use crate::router::AppState;

/// Ingest a chainhook batch. Any parse outcome is acknowledged so the
/// indexer does not redeliver; only auth and processor outages are errors.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.ingestor.ingest(authorization, &body).await {
        Ok(report) => {
            debug!(submitted = report.submitted, "[xp-07] Webhook acknowledged");
            Ok(Json(json!({"status": "received"})))
        }
        Err(IngestError::MalformedPayload(_)) => Ok(Json(json!({"status": "received"}))),
        Err(e) => Err(e.into()),
    }
}
