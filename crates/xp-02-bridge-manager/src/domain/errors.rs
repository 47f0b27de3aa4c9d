//! Bridge manager errors.

use shared_types::{BridgeErrorCode, ChainId, ProtocolKind};
use thiserror::Error;

/// Bridge manager error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// No registered adapter supports the route.
    #[error("No bridge route from {source_chain} to {destination}")]
    NoRoute {
        /// Source chain.
        source_chain: ChainId,
        /// Destination chain.
        destination: ChainId,
    },

    /// An adapter for this protocol is already registered.
    #[error("Adapter already registered for protocol {0}")]
    DuplicateAdapter(ProtocolKind),

    /// Configuration rejected.
    #[error("Invalid bridge manager config: {0}")]
    InvalidConfig(String),
}

impl ManagerError {
    /// Map onto the bridge error taxonomy.
    pub fn code(&self) -> BridgeErrorCode {
        match self {
            ManagerError::NoRoute { .. } => BridgeErrorCode::NoRoute,
            ManagerError::DuplicateAdapter(_) | ManagerError::InvalidConfig(_) => {
                BridgeErrorCode::NetworkError
            }
        }
    }
}
