//! Gateway errors and their HTTP mapping.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shared_types::BridgeErrorCode;
use thiserror::Error;
use tracing::error;
use xp_04_purchase_engine::EngineError;
use xp_05_event_ingestion::IngestError;

/// Gateway error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{message}")]
    BadRequest {
        code: Option<BridgeErrorCode>,
        message: String,
    },

    #[error("Intent not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid gateway config: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        GatewayError::BadRequest {
            code: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::Internal(_) | GatewayError::Config(_) | GatewayError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<BridgeErrorCode>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "[xp-07] Request failed");
        }
        let code = match &self {
            GatewayError::BadRequest { code, .. } => *code,
            _ => None,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
            code,
        });

        if matches!(self, GatewayError::Unauthorized) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

impl From<EngineError> for GatewayError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(e) => GatewayError::BadRequest {
                code: Some(e.code()),
                message: e.to_string(),
            },
            EngineError::NotFound(id) => GatewayError::NotFound(id),
            EngineError::AlreadyInFlight(_) => GatewayError::Conflict(err.to_string()),
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

impl From<IngestError> for GatewayError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Unauthorized => GatewayError::Unauthorized,
            IngestError::MalformedPayload(message) => GatewayError::bad_request(message),
            other => GatewayError::Internal(other.to_string()),
        }
    }
}
