//! # Outbound Ports
//!
//! Destination-chain steps that follow a successful bridge.

use async_trait::async_trait;
use shared_types::Intent;
use xp_01_protocol_adapters::BridgeDetails;

use crate::domain::StepError;

/// Destination mint/claim - outbound port.
#[async_trait]
pub trait MintClaimer: Send + Sync {
    /// Claim attested funds on the destination; returns the mint tx hash.
    ///
    /// `details` is empty when processing resumed without the attestation in
    /// memory; implementations then look it up by `intent.source_tx_hash`.
    async fn claim(&self, intent: &Intent, details: &BridgeDetails) -> Result<String, StepError>;
}

/// Destination purchase - outbound port.
#[async_trait]
pub trait PurchaseExecutor: Send + Sync {
    /// Execute the purchase for `intent`; returns the purchase tx hash.
    async fn purchase(&self, intent: &Intent) -> Result<String, StepError>;
}
