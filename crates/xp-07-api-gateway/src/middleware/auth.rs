//! Bearer check for admin routes.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;
use xp_05_event_ingestion::verify_bearer;

use crate::domain::GatewayError;
use crate::router::AppState;

/// Reject requests without the admin bearer token.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if state.admin_token.is_empty() || verify_bearer(authorization, &state.admin_token) {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "[xp-07] Admin request rejected");
    GatewayError::Unauthorized.into_response()
}
