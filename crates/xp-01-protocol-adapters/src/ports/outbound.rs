//! # Outbound Ports
//!
//! Traits for external dependencies (chain clients, attestation service,
//! swap router) plus the progress sink adapters report into.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::ChainId;
use std::sync::Arc;

use crate::domain::{AdapterError, BridgeParams, ProgressStage};

/// What a source-chain transaction does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Burn for attested mint on the destination.
    Burn,
    /// Plain deposit to a router-provided address.
    Deposit,
    /// Call into a bridge contract that emits a relay event.
    ContractCall,
}

/// Source transaction to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub kind: TransferKind,
    pub from: String,
    /// Recipient: deposit address, bridge contract, or destination account.
    pub to: String,
    pub amount: String,
    pub token: String,
    /// Destination routing hint carried with the transaction.
    pub memo: Option<String>,
}

/// Confirmed source transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: String,
    pub confirmations: u32,
    pub success: bool,
    /// Bridge message hash emitted by a burn.
    pub message_hash: Option<String>,
}

/// Source chain client - outbound port.
#[async_trait]
pub trait SourceChainClient: Send + Sync {
    /// Chain this client talks to.
    fn chain(&self) -> ChainId;

    /// Sign and submit; returns the transaction hash.
    async fn submit_transfer(&self, request: &TransferRequest) -> Result<String, AdapterError>;

    /// Wait for the transaction to confirm.
    async fn confirm(&self, tx_hash: &str) -> Result<Confirmation, AdapterError>;
}

/// Resolves the client for a chain.
pub trait ChainClientProvider: Send + Sync {
    /// Client for `chain`, if one is configured.
    fn client(&self, chain: ChainId) -> Option<Arc<dyn SourceChainClient>>;
}

/// Attestation service - outbound port.
#[async_trait]
pub trait AttestationService: Send + Sync {
    /// `Ok(None)` while the attestation is still pending.
    async fn fetch_attestation(&self, message_hash: &str) -> Result<Option<String>, AdapterError>;
}

/// Liquidity route quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub quote_id: String,
    /// Where the source funds must be deposited.
    pub deposit_address: String,
    pub amount_in: String,
    pub amount_out: String,
    pub fee: String,
}

/// Destination-side settlement of a swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSettlement {
    pub destination_tx_hash: String,
}

/// Swap router - outbound port.
#[async_trait]
pub trait SwapRouter: Send + Sync {
    /// Quote a route; `RouteUnavailable` when none exists.
    async fn quote(&self, params: &BridgeParams) -> Result<SwapQuote, AdapterError>;

    /// Settle on the destination once the deposit is confirmed.
    async fn execute(
        &self,
        quote: &SwapQuote,
        deposit_tx_hash: &str,
    ) -> Result<SwapSettlement, AdapterError>;
}

/// Progress sink for bridge milestones.
pub trait ProgressReporter: Send + Sync {
    /// Report a milestone for an intent.
    fn report(&self, intent_id: &str, stage: ProgressStage, detail: Option<&str>);
}

// =============================================================================
// Progress Implementations
// =============================================================================

/// Discards progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _intent_id: &str, _stage: ProgressStage, _detail: Option<&str>) {}
}

/// Logs progress at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, intent_id: &str, stage: ProgressStage, detail: Option<&str>) {
        tracing::debug!(
            intent_id = %intent_id,
            stage = stage.as_str(),
            detail = detail.unwrap_or(""),
            "[xp-01] Bridge progress"
        );
    }
}

/// Records every milestone, for tests.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<(String, ProgressStage)>>,
}

impl RecordingProgress {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages recorded so far, in order.
    pub fn stages(&self) -> Vec<ProgressStage> {
        self.events.lock().iter().map(|(_, stage)| *stage).collect()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, intent_id: &str, stage: ProgressStage, _detail: Option<&str>) {
        self.events.lock().push((intent_id.to_string(), stage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_progress_keeps_order() {
        let progress = RecordingProgress::new();
        progress.report("i-1", ProgressStage::Validating, None);
        progress.report("i-1", ProgressStage::Broadcasting, Some("0xabc"));
        assert_eq!(
            progress.stages(),
            vec![ProgressStage::Validating, ProgressStage::Broadcasting]
        );
    }
}
