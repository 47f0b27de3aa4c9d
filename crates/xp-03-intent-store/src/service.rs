//! # Intent Service
//!
//! State-machine-aware access to the repository. Every mutation goes through
//! `mutate`, which reloads and reapplies on a stale write.

use shared_types::{now_millis, Intent, IntentError, IntentStatus};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::StoreError;
use crate::ports::IntentRepository;

/// Attempts before a contended write gives up.
pub const DEFAULT_WRITE_RETRIES: u32 = 5;

/// Intent state machine service.
#[derive(Clone)]
pub struct IntentService {
    repo: Arc<dyn IntentRepository>,
    write_retries: u32,
}

impl IntentService {
    /// Wrap a repository.
    pub fn new(repo: Arc<dyn IntentRepository>) -> Self {
        Self {
            repo,
            write_retries: DEFAULT_WRITE_RETRIES,
        }
    }

    /// Underlying repository.
    pub fn repository(&self) -> &Arc<dyn IntentRepository> {
        &self.repo
    }

    /// Store a freshly created intent.
    pub async fn create(&self, intent: Intent) -> Result<Intent, StoreError> {
        let stored = self.repo.insert(intent).await?;
        info!(
            intent_id = %stored.id,
            source = %stored.source_chain,
            destination = %stored.destination_chain,
            amount = %stored.amount,
            "[xp-03] Intent created"
        );
        Ok(stored)
    }

    /// Fetch, or `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Intent, StoreError> {
        self.repo
            .get(id)
            .await
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Fetch if present.
    pub async fn find(&self, id: &str) -> Option<Intent> {
        self.repo.get(id).await
    }

    /// Load, apply `f`, and write back. On a stale write the intent is
    /// reloaded and `f` applied again. No write happens if `f` changed nothing.
    pub async fn mutate<T, F>(&self, id: &str, mut f: F) -> Result<(Intent, T), StoreError>
    where
        F: FnMut(&mut Intent, u64) -> Result<T, IntentError> + Send,
        T: Send,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut intent = self.get(id).await?;
            let original = intent.clone();
            let out = f(&mut intent, now_millis())?;
            if intent == original {
                return Ok((intent, out));
            }

            match self.repo.update(intent).await {
                Ok(saved) => return Ok((saved, out)),
                Err(StoreError::StaleWrite { loaded, stored, .. })
                    if attempt < self.write_retries =>
                {
                    debug!(
                        intent_id = %id,
                        loaded,
                        stored,
                        attempt,
                        "[xp-03] Stale write, reloading"
                    );
                }
                Err(StoreError::StaleWrite { .. }) => {
                    warn!(intent_id = %id, attempt, "[xp-03] Write contention, giving up");
                    return Err(StoreError::Contended(id.to_string()));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Move an intent to `next`.
    pub async fn transition(&self, id: &str, next: IntentStatus) -> Result<Intent, StoreError> {
        let (intent, from) = self
            .mutate(id, |intent, now| {
                let from = intent.status;
                intent.transition_to(next, now)?;
                Ok(from)
            })
            .await?;
        info!(
            intent_id = %id,
            from = %from,
            to = %next,
            "[xp-03] Intent transitioned"
        );
        Ok(intent)
    }

    /// Intents involving `address`, newest first.
    pub async fn list_by_address(&self, address: &str) -> Vec<Intent> {
        self.repo.list_by_address(address).await
    }

    /// Non-terminal intents, oldest first.
    pub async fn list_in_flight(&self) -> Vec<Intent> {
        self.repo.list_in_flight().await
    }
}
