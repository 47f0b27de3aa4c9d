//! # Status Service
//!
//! Read-only status answers from the local intent store.

use async_trait::async_trait;
use tracing::debug;
use xp_03_intent_store::IntentService;

use crate::domain::{PollerError, StatusResponse};
use crate::ports::StatusSource;

/// Status queries against the local store.
#[derive(Clone)]
pub struct StatusService {
    intents: IntentService,
}

impl StatusService {
    pub fn new(intents: IntentService) -> Self {
        Self { intents }
    }

    /// Status of `intent_id`. Unknown ids answer `broadcasting`.
    pub async fn status(&self, intent_id: &str) -> StatusResponse {
        match self.intents.find(intent_id).await {
            Some(intent) => StatusResponse::from_intent(&intent),
            None => {
                debug!(intent_id, "[xp-06] Unknown intent, answering broadcasting");
                StatusResponse::broadcasting()
            }
        }
    }
}

#[async_trait]
impl StatusSource for StatusService {
    async fn fetch(&self, intent_id: &str) -> Result<StatusResponse, PollerError> {
        Ok(self.status(intent_id).await)
    }
}
