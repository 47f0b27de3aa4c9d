//! Event ingestion errors.

use thiserror::Error;

/// Webhook-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Missing or wrong bearer token.
    #[error("Unauthorized webhook request")]
    Unauthorized,

    /// Body is not a chainhook payload.
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    /// Every matched transaction hit an internal processor error.
    #[error("Intent processor unavailable: {0}")]
    ProcessorUnavailable(String),

    /// Configuration rejected.
    #[error("Invalid ingestion config: {0}")]
    InvalidConfig(String),
}

/// Why one transaction did not become an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A purchase event was found but a required field is missing.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but unusable.
    #[error("Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}
