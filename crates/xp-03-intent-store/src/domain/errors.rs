//! Intent store errors.

use shared_types::IntentError;
use thiserror::Error;

/// Store error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No intent with this id.
    #[error("Intent not found: {0}")]
    NotFound(String),

    /// Insert collided with an existing id.
    #[error("Intent already exists: {0}")]
    AlreadyExists(String),

    /// Another writer got there first.
    #[error("Stale write for intent {id}: loaded version {loaded}, stored version {stored}")]
    StaleWrite {
        /// Intent id.
        id: String,
        /// Version the writer loaded.
        loaded: u64,
        /// Version currently stored.
        stored: u64,
    },

    /// Concurrent writers kept winning.
    #[error("Intent {0} is contended; gave up after retries")]
    Contended(String),

    /// State machine rejected the mutation.
    #[error(transparent)]
    Intent(#[from] IntentError),
}
