//! # Inbound Ports
//!
//! Record store for purchase intents.

use async_trait::async_trait;
use shared_types::Intent;

use crate::domain::StoreError;

/// Intent repository - inbound port.
///
/// Writers load an intent, mutate it, then `update` it. `update` succeeds
/// only if nobody else wrote in between (optimistic concurrency on
/// `version`) and `updated_at` moved forward.
#[async_trait]
pub trait IntentRepository: Send + Sync {
    /// Store a new intent. Fails if the id exists.
    async fn insert(&self, intent: Intent) -> Result<Intent, StoreError>;

    /// Fetch by id.
    async fn get(&self, id: &str) -> Option<Intent>;

    /// Compare-and-swap write; returns the stored copy with its new version.
    async fn update(&self, intent: Intent) -> Result<Intent, StoreError>;

    /// Intents where `address` is the source or destination participant,
    /// newest first.
    async fn list_by_address(&self, address: &str) -> Vec<Intent>;

    /// Non-terminal intents, oldest first.
    async fn list_in_flight(&self) -> Vec<Intent>;

    /// Number of stored intents.
    async fn count(&self) -> usize;
}
