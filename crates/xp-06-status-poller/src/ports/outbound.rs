//! # Outbound Ports

use async_trait::async_trait;

use crate::domain::{PollerError, StatusResponse};

/// Where a poller reads status from - outbound port.
///
/// Implemented by `StatusService` for the local store.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Current status of an intent.
    async fn fetch(&self, intent_id: &str) -> Result<StatusResponse, PollerError>;
}
