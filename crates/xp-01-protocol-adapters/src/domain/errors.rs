//! # Adapter Errors
//!
//! Failures raised by outbound ports (chain clients, attestation service,
//! swap router). Adapters never surface these directly: `bridge()` folds them
//! into a failed `BridgeResult` carrying the mapped code.

use shared_types::{BridgeErrorCode, ChainId, ValidationError};
use thiserror::Error;

/// Outbound port error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// Transient connectivity problem.
    #[error("Network error: {0}")]
    Network(String),

    /// Chain confirmation did not arrive in time.
    #[error("Transaction timeout: {0}")]
    Timeout(String),

    /// Nonce contention or replacement underpriced.
    #[error("Nonce error: {0}")]
    Nonce(String),

    /// Signer declined the transaction.
    #[error("Rejected by user: {0}")]
    Rejected(String),

    /// Source balance too low.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Attestation never became available.
    #[error("Attestation timeout for message {message_hash}")]
    AttestationTimeout {
        /// Message hash that was polled.
        message_hash: String,
    },

    /// Swap router has no route for the pair.
    #[error("Route unavailable: {source_chain} -> {destination}")]
    RouteUnavailable {
        /// Source chain.
        source_chain: ChainId,
        /// Destination chain.
        destination: ChainId,
    },

    /// No chain client configured for a chain.
    #[error("No client configured for chain {0}")]
    MissingClient(ChainId),

    /// Parameters failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParams(#[from] ValidationError),
}

impl AdapterError {
    /// Map onto the bridge error taxonomy.
    pub fn code(&self) -> BridgeErrorCode {
        match self {
            AdapterError::Network(_)
            | AdapterError::RouteUnavailable { .. }
            | AdapterError::MissingClient(_) => BridgeErrorCode::NetworkError,
            AdapterError::Timeout(_) => BridgeErrorCode::TransactionTimeout,
            AdapterError::Nonce(_) => BridgeErrorCode::NonceError,
            AdapterError::Rejected(_) => BridgeErrorCode::WalletRejected,
            AdapterError::InsufficientFunds(_) => BridgeErrorCode::InsufficientFunds,
            AdapterError::AttestationTimeout { .. } => BridgeErrorCode::AttestationTimeout,
            AdapterError::InvalidParams(e) => e.code(),
        }
    }
}
