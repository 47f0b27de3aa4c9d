//! Purchase engine errors.

use shared_types::{BridgeErrorCode, ValidationError};
use thiserror::Error;
use xp_03_intent_store::StoreError;

/// Engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Request failed validation.
    #[error("Invalid intent request: {0}")]
    Validation(#[from] ValidationError),

    /// No intent with this id.
    #[error("Intent not found: {0}")]
    NotFound(String),

    /// Another task is already driving this intent.
    #[error("Intent {0} is already being processed")]
    AlreadyInFlight(String),

    /// Store rejected an operation.
    #[error("Intent store error: {0}")]
    Store(StoreError),

    /// Configuration rejected.
    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EngineError::NotFound(id),
            other => EngineError::Store(other),
        }
    }
}

impl EngineError {
    /// Bridge error code for caller-facing validation failures.
    pub fn code(&self) -> Option<BridgeErrorCode> {
        match self {
            EngineError::Validation(e) => Some(e.code()),
            _ => None,
        }
    }
}

/// Failure of a mint or purchase step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct StepError {
    /// Classified code.
    pub code: BridgeErrorCode,
    /// Raw message.
    pub message: String,
}

impl StepError {
    /// Create a step error.
    pub fn new(code: BridgeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
