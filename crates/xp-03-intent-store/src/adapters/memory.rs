//! In-memory intent repository backed by a sharded `DashMap`.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{Intent, IntentError};
use tracing::debug;

use crate::domain::StoreError;
use crate::ports::IntentRepository;

/// Sharded in-memory store. No global lock.
#[derive(Debug, Default)]
pub struct InMemoryIntentStore {
    intents: DashMap<String, Intent>,
}

impl InMemoryIntentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntentRepository for InMemoryIntentStore {
    async fn insert(&self, intent: Intent) -> Result<Intent, StoreError> {
        match self.intents.entry(intent.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(intent.id)),
            Entry::Vacant(slot) => {
                debug!(intent_id = %intent.id, "[xp-03] Intent stored");
                slot.insert(intent.clone());
                Ok(intent)
            }
        }
    }

    async fn get(&self, id: &str) -> Option<Intent> {
        self.intents.get(id).map(|entry| entry.value().clone())
    }

    async fn update(&self, mut intent: Intent) -> Result<Intent, StoreError> {
        let mut stored = self
            .intents
            .get_mut(&intent.id)
            .ok_or_else(|| StoreError::NotFound(intent.id.clone()))?;

        if stored.status.is_terminal() {
            return Err(IntentError::Terminal(stored.status).into());
        }
        if intent.version != stored.version || intent.updated_at <= stored.updated_at {
            return Err(StoreError::StaleWrite {
                id: intent.id,
                loaded: intent.version,
                stored: stored.version,
            });
        }

        intent.version = stored.version + 1;
        *stored = intent.clone();
        Ok(intent)
    }

    async fn list_by_address(&self, address: &str) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self
            .intents
            .iter()
            .filter(|entry| entry.value().involves(address))
            .map(|entry| entry.value().clone())
            .collect();
        intents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        intents
    }

    async fn list_in_flight(&self) -> Vec<Intent> {
        let mut intents: Vec<Intent> = self
            .intents
            .iter()
            .filter(|entry| !entry.value().is_terminal())
            .map(|entry| entry.value().clone())
            .collect();
        intents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        intents
    }

    async fn count(&self) -> usize {
        self.intents.len()
    }
}
