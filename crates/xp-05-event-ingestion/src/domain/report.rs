//! Per-batch ingestion outcome.

use serde::{Deserialize, Serialize};

/// Counters for one webhook batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Applied transactions examined.
    pub transactions: usize,
    /// Transactions skipped because the node reported them failed.
    pub failed_transactions: usize,
    /// Purchase events found.
    pub matched: usize,
    /// Intents handed to the processor and accepted.
    pub submitted: usize,
    /// Purchase events that could not be turned into a request.
    pub malformed: usize,
    /// Requests the processor rejected as invalid.
    pub rejected: usize,
    /// Requests that hit an internal processor error.
    pub errors: usize,
    /// Rolled-back transactions logged and ignored.
    pub rolled_back: usize,
}

impl BatchReport {
    /// Whether every matched request hit an internal error.
    pub fn processor_down(&self) -> bool {
        self.errors > 0 && self.submitted == 0 && self.rejected == 0
    }
}
