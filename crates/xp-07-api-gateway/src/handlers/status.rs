//! `GET /status/:id`

use axum::extract::{Path, State};
use axum::Json;
use xp_06_status_poller::StatusResponse;

use crate::router::AppState;

pub async fn get_status(
    State(state): State<AppState>,
    Path(intent_id): Path<String>,
) -> Json<StatusResponse> {
    Json(state.status.status(&intent_id).await)
}
