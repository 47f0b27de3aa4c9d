//! Event ingestion configuration.

use shared_types::ChainId;

use super::errors::IngestError;

/// Print-event marker that identifies a purchase.
pub const PURCHASE_MARKER: &str = "bridge-purchase-initiated";

/// Ingestion configuration.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Bearer secret. Empty disables authentication (development only).
    pub webhook_secret: String,
    /// Marker value to match.
    pub marker: String,
    /// Chain the events come from.
    pub source_chain: ChainId,
    /// Chain the purchase settles on.
    pub destination_chain: ChainId,
    /// Token when the event names none.
    pub default_token: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            webhook_secret: String::new(),
            marker: PURCHASE_MARKER.to_string(),
            source_chain: ChainId::Stacks,
            destination_chain: ChainId::Base,
            default_token: "stx".to_string(),
        }
    }
}

impl IngestConfig {
    /// Config with a webhook secret and defaults elsewhere.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.marker.trim().is_empty() {
            return Err(IngestError::InvalidConfig("marker must not be empty".into()));
        }
        if self.source_chain == self.destination_chain {
            return Err(IngestError::InvalidConfig(
                "source and destination chain must differ".into(),
            ));
        }
        if self.default_token.trim().is_empty() {
            return Err(IngestError::InvalidConfig(
                "default_token must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether requests must carry a bearer token.
    pub fn auth_enabled(&self) -> bool {
        !self.webhook_secret.is_empty()
    }
}
