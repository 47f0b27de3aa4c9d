//! # Inbound Ports

use async_trait::async_trait;

use crate::domain::{BatchReport, IngestError};

/// Webhook entry point - inbound port.
#[async_trait]
pub trait WebhookIngestor: Send + Sync {
    /// Authenticate, then ingest a raw body. Authentication is checked
    /// before the body is parsed.
    async fn ingest(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<BatchReport, IngestError>;
}
