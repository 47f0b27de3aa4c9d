//! Status poller errors.

use thiserror::Error;

/// Poller error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollerError {
    /// Status source could not answer. Transient for the poller.
    #[error("Status source error: {0}")]
    Source(String),

    /// Configuration rejected.
    #[error("Invalid poller config: {0}")]
    InvalidConfig(String),
}
