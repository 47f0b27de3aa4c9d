//! # Value Objects
//!
//! Inputs and outputs of the `ProtocolAdapter` contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{
    parse_amount, Amount, BridgeErrorCode, ChainId, Intent, ValidationError,
};

/// Parameters for one bridge operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeParams {
    /// Owning intent (used for progress and log correlation).
    pub intent_id: String,
    pub source_chain: ChainId,
    pub destination_chain: ChainId,
    /// Decimal string in source-asset units.
    pub amount: String,
    pub token: String,
    pub source_address: String,
    pub destination_address: String,
}

impl BridgeParams {
    /// Build parameters from an intent.
    pub fn from_intent(intent: &Intent) -> Self {
        Self {
            intent_id: intent.id.clone(),
            source_chain: intent.source_chain,
            destination_chain: intent.destination_chain,
            amount: intent.amount.clone(),
            token: intent.token.clone(),
            source_address: intent.source_address.clone(),
            destination_address: intent.destination_address.clone(),
        }
    }

    /// Parse the amount and check both addresses.
    pub fn check(&self) -> Result<Amount, ValidationError> {
        let amount = parse_amount(&self.amount)?;
        self.source_chain.validate_address(&self.source_address)?;
        self.destination_chain
            .validate_address(&self.destination_address)?;
        Ok(amount)
    }

    /// Check parameters plus an adapter-specific minimum amount.
    pub fn check_with_minimum(&self, minimum: Decimal) -> ValidationOutcome {
        match self.check() {
            Ok(amount) if amount.value() < minimum => ValidationOutcome::reject(
                BridgeErrorCode::InvalidAmount,
                format!("Amount {} is below the minimum of {}", amount, minimum.normalize()),
            ),
            Ok(_) => ValidationOutcome::ok(),
            Err(e) => ValidationOutcome::reject(e.code(), e.to_string()),
        }
    }
}

/// Fee and timing estimate. Side-effect free.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    /// Fee in source-asset units, decimal string.
    pub fee: String,
    pub estimated_time_ms: u64,
    pub gas_note: Option<String>,
}

/// Result of `validate()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error: Option<String>,
    pub error_code: Option<BridgeErrorCode>,
}

impl ValidationOutcome {
    /// Passed.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            error_code: None,
        }
    }

    /// Rejected with a code and message.
    pub fn reject(code: BridgeErrorCode, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
            error_code: Some(code),
        }
    }
}

/// Settlement state reported by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeStatus {
    /// Funds delivered on the destination.
    Completed,
    /// Attestation available, destination claim outstanding.
    AwaitingMint,
    /// Operation failed.
    Failed,
}

/// Protocol-specific details attached to a result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDetails {
    /// Burn message hash (attestation bridges).
    pub message_hash: Option<String>,
    /// Attestation needed to claim on the destination.
    pub attestation: Option<String>,
    /// Destination settlement transaction (natively settling bridges).
    pub destination_tx_hash: Option<String>,
    /// Quote or relay reference.
    pub reference: Option<String>,
    /// Amount expected on the destination, decimal string.
    pub amount_out: Option<String>,
}

/// Result of `bridge()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResult {
    pub success: bool,
    pub status: BridgeStatus,
    pub source_tx_hash: Option<String>,
    pub details: Option<BridgeDetails>,
    pub error: Option<String>,
    pub error_code: Option<BridgeErrorCode>,
    /// Destination claim step required before purchase.
    pub requires_mint: bool,
}

impl BridgeResult {
    /// Settled on the destination.
    pub fn completed(source_tx_hash: impl Into<String>, details: BridgeDetails) -> Self {
        Self {
            success: true,
            status: BridgeStatus::Completed,
            source_tx_hash: Some(source_tx_hash.into()),
            details: Some(details),
            error: None,
            error_code: None,
            requires_mint: false,
        }
    }

    /// Attested; destination mint outstanding.
    pub fn awaiting_mint(source_tx_hash: impl Into<String>, details: BridgeDetails) -> Self {
        Self {
            success: true,
            status: BridgeStatus::AwaitingMint,
            source_tx_hash: Some(source_tx_hash.into()),
            details: Some(details),
            error: None,
            error_code: None,
            requires_mint: true,
        }
    }

    /// Failed before anything reached the source chain.
    pub fn failure(code: Option<BridgeErrorCode>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: BridgeStatus::Failed,
            source_tx_hash: None,
            details: None,
            error: Some(message.into()),
            error_code: code,
            requires_mint: false,
        }
    }

    /// Attach the source transaction hash to a failure.
    pub fn with_source_tx(mut self, source_tx_hash: Option<String>) -> Self {
        if self.source_tx_hash.is_none() {
            self.source_tx_hash = source_tx_hash;
        }
        self
    }
}

/// Coarse progress milestones emitted during `bridge()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Validating,
    Approving,
    Broadcasting,
    Confirming,
    AwaitingAttestation,
    Completed,
    Failed,
}

impl ProgressStage {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStage::Validating => "validating",
            ProgressStage::Approving => "approving",
            ProgressStage::Broadcasting => "broadcasting",
            ProgressStage::Confirming => "confirming",
            ProgressStage::AwaitingAttestation => "awaiting_attestation",
            ProgressStage::Completed => "completed",
            ProgressStage::Failed => "failed",
        }
    }
}
