//! # Error Types
//!
//! The bridge error taxonomy and the validation / transition errors shared by
//! every subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::chain::ChainId;
use crate::entities::IntentStatus;

/// Classified bridge failure kinds.
///
/// Classification happens once, at the bridge manager boundary; the code (not
/// the raw message) decides whether a retry or fallback is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeErrorCode {
    /// Upstream attestation service slow.
    AttestationTimeout,
    /// Source or destination chain confirmation slow.
    TransactionTimeout,
    /// Nonce contention or replacement.
    NonceError,
    /// Generic transient connectivity.
    NetworkError,
    /// Requires the user to top up.
    InsufficientFunds,
    /// User declined signing.
    WalletRejected,
    /// Caller supplied a malformed address.
    InvalidAddress,
    /// Caller supplied a zero, negative or unparsable amount.
    InvalidAmount,
    /// No adapter supports the route.
    NoRoute,
    /// Circuit breaker tripped.
    TooManyFailures,
}

impl BridgeErrorCode {
    /// Whether a retry (same or different protocol) can succeed without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AttestationTimeout | Self::TransactionTimeout | Self::NonceError | Self::NetworkError
        )
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttestationTimeout => "ATTESTATION_TIMEOUT",
            Self::TransactionTimeout => "TRANSACTION_TIMEOUT",
            Self::NonceError => "NONCE_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::WalletRejected => "WALLET_REJECTED",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::NoRoute => "NO_ROUTE",
            Self::TooManyFailures => "TOO_MANY_FAILURES",
        }
    }
}

impl fmt::Display for BridgeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s {
            "ATTESTATION_TIMEOUT" => Self::AttestationTimeout,
            "TRANSACTION_TIMEOUT" => Self::TransactionTimeout,
            "NONCE_ERROR" => Self::NonceError,
            "NETWORK_ERROR" => Self::NetworkError,
            "INSUFFICIENT_FUNDS" => Self::InsufficientFunds,
            "WALLET_REJECTED" => Self::WalletRejected,
            "INVALID_ADDRESS" => Self::InvalidAddress,
            "INVALID_AMOUNT" => Self::InvalidAmount,
            "NO_ROUTE" => Self::NoRoute,
            "TOO_MANY_FAILURES" => Self::TooManyFailures,
            _ => return Err(()),
        };
        Ok(code)
    }
}

/// Input validation failures for intent requests and bridge parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Amount is not a positive decimal.
    #[error("Invalid amount: {0:?} (must be a decimal greater than zero)")]
    InvalidAmount(String),

    /// Address does not match the chain's format.
    #[error("Invalid {chain} address: {address}")]
    InvalidAddress { chain: ChainId, address: String },

    /// Chain name not in the supported set.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// Protocol name not recognised.
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    /// Source and destination are the same chain.
    #[error("Source and destination chain are both {0}")]
    SameChain(ChainId),

    /// Required field missing or empty.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    /// Map onto the bridge error taxonomy.
    pub fn code(&self) -> BridgeErrorCode {
        match self {
            ValidationError::InvalidAmount(_) => BridgeErrorCode::InvalidAmount,
            ValidationError::InvalidAddress { .. } => BridgeErrorCode::InvalidAddress,
            ValidationError::UnknownChain(_)
            | ValidationError::UnknownProtocol(_)
            | ValidationError::SameChain(_) => BridgeErrorCode::NoRoute,
            // caller input error; no dedicated code
            ValidationError::MissingField(_) => BridgeErrorCode::InvalidAddress,
        }
    }
}

/// Intent mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// Transition not allowed by the state machine.
    #[error("Invalid intent transition: {from} -> {to}")]
    InvalidTransition { from: IntentStatus, to: IntentStatus },

    /// Intent already reached `executed` or `failed`.
    #[error("Intent is terminal ({0}); no further transitions")]
    Terminal(IntentStatus),

    /// A set-once transaction hash was already recorded with a different value.
    #[error("{field} already recorded as {existing}")]
    HashAlreadySet { field: &'static str, existing: String },

    /// No attempt is open to finish.
    #[error("No open bridge attempt")]
    NoOpenAttempt,
}
