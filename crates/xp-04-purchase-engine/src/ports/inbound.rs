//! # Inbound Ports
//!
//! Entry point used by event ingestion (and anything else that turns an
//! external signal into a purchase).

use async_trait::async_trait;
use shared_types::{Intent, IntentRequest};

use crate::domain::EngineError;

/// Intent processor - inbound port.
#[async_trait]
pub trait IntentProcessor: Send + Sync {
    /// Create and start processing an intent. Idempotent on `request.id`:
    /// an existing intent is returned as-is and not re-run.
    async fn process_request(&self, request: IntentRequest) -> Result<Intent, EngineError>;
}
