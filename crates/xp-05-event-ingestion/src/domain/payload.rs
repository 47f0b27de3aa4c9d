//! Chainhook-style webhook payload.
//!
//! Every level is lenient: missing arrays default to empty and event bodies
//! stay as raw JSON so one odd event cannot reject the whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level webhook body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainhookPayload {
    /// Newly applied blocks.
    #[serde(default)]
    pub apply: Vec<BlockEvent>,
    /// Blocks rolled back by a reorg.
    #[serde(default)]
    pub rollback: Vec<BlockEvent>,
}

/// One block and its transactions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockEvent {
    #[serde(default)]
    pub block_identifier: Option<BlockIdentifier>,
    #[serde(default)]
    pub transactions: Vec<TransactionEvent>,
}

/// Block height and hash.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockIdentifier {
    #[serde(default)]
    pub index: Option<u64>,
    #[serde(default)]
    pub hash: Option<String>,
}

/// One transaction with its receipt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    #[serde(default)]
    pub transaction_identifier: TransactionIdentifier,
    #[serde(default)]
    pub metadata: TransactionMetadata,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    #[serde(default)]
    pub hash: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    #[serde(default)]
    pub sender: Option<String>,
    /// `None` is treated as success.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub receipt: Receipt,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default)]
    pub events: Vec<Value>,
}

impl ChainhookPayload {
    /// Parse a raw body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl BlockEvent {
    /// Height, or 0 when absent.
    pub fn height(&self) -> u64 {
        self.block_identifier
            .as_ref()
            .and_then(|b| b.index)
            .unwrap_or(0)
    }
}

impl TransactionEvent {
    /// Transaction hash.
    pub fn hash(&self) -> &str {
        &self.transaction_identifier.hash
    }

    /// False only when the node reported the transaction as failed.
    pub fn succeeded(&self) -> bool {
        self.metadata.success.unwrap_or(true)
    }
}
