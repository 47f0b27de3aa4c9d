//! Caller-facing status view of an intent.

use serde::{Deserialize, Serialize};
use shared_types::{BridgeErrorCode, Intent, IntentStatus, ProtocolKind};

/// Status answer for one intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: IntentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<BridgeErrorCode>,
    /// Present once the purchase executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PurchaseReceipt>,
}

/// Settlement details of an executed intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_tx_hash: Option<String>,
    pub purchase_tx_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u64>,
    pub executed_at: u64,
}

impl StatusResponse {
    /// Answer for an id the store does not know yet. The source transaction
    /// may still be propagating, so callers keep polling.
    pub fn broadcasting() -> Self {
        Self {
            status: IntentStatus::Broadcasting,
            source_tx_id: None,
            error: None,
            error_code: None,
            receipt: None,
        }
    }

    /// Status view of a stored intent.
    pub fn from_intent(intent: &Intent) -> Self {
        let receipt = match (&intent.status, &intent.purchase_tx_hash) {
            (IntentStatus::Executed, Some(purchase)) => Some(PurchaseReceipt {
                protocol: intent.active_protocol(),
                mint_tx_hash: intent.mint_tx_hash.clone(),
                purchase_tx_hash: purchase.clone(),
                units: intent.units,
                executed_at: intent.updated_at,
            }),
            _ => None,
        };
        Self {
            status: intent.status,
            source_tx_id: intent.source_tx_hash.clone(),
            error: intent.error_message.clone(),
            error_code: intent.error_code,
            receipt,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
