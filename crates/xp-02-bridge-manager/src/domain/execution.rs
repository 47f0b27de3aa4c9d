//! Result of one managed adapter call.

use shared_types::{BridgeErrorCode, ProtocolKind};
use xp_01_protocol_adapters::BridgeResult;

/// Outcome of `BridgeManager::execute`.
///
/// On failure `result.error_code` is always set to the classified code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeExecution {
    /// Adapter that ran.
    pub protocol: ProtocolKind,
    /// Adapter result with a classified error code.
    pub result: BridgeResult,
    /// Wall time spent in validate + bridge.
    pub elapsed_ms: u64,
    /// Rejected by `validate()`; the adapter never bridged.
    pub rejected: bool,
    /// The adapter settled after `bridge_timeout` had passed.
    pub overdue: bool,
}

impl BridgeExecution {
    /// Classified failure code, `None` on success.
    pub fn error_code(&self) -> Option<BridgeErrorCode> {
        if self.result.success {
            None
        } else {
            self.result.error_code
        }
    }

    /// Raw failure message.
    pub fn error_message(&self) -> &str {
        self.result.error.as_deref().unwrap_or("")
    }
}
