//! Scripted adapter.
//!
//! A `ProtocolAdapter` whose `bridge()` outcomes are queued up front. Used by
//! the bridge manager, purchase engine and scenario tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{BridgeErrorCode, ChainId, ProtocolKind};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{
    AdapterError, BridgeDetails, BridgeParams, BridgeResult, FeeEstimate, HealthTracker,
    ProgressStage, ValidationOutcome,
};
use crate::ports::inbound::ProtocolAdapter;
use crate::ports::outbound::ProgressReporter;

/// One scripted `bridge()` outcome.
#[derive(Clone, Debug)]
pub enum ScriptedOutcome {
    /// Settles natively.
    Complete,
    /// Attested, mint required.
    AwaitMint,
    /// Fails with an adapter-reported code.
    Fail(BridgeErrorCode, String),
    /// Fails with only a raw message.
    FailRaw(String),
    /// Sleeps, then settles.
    Hang(Duration),
}

/// Adapter with queued outcomes.
pub struct ScriptedAdapter {
    kind: ProtocolKind,
    routes: Vec<(ChainId, ChainId)>,
    script: Mutex<VecDeque<ScriptedOutcome>>,
    fallback: ScriptedOutcome,
    rejection: Option<ValidationOutcome>,
    bridge_calls: AtomicUsize,
    health: HealthTracker,
}

impl ScriptedAdapter {
    /// Adapter that completes every bridge on the given routes.
    pub fn new(kind: ProtocolKind, routes: impl IntoIterator<Item = (ChainId, ChainId)>) -> Self {
        Self {
            kind,
            routes: routes.into_iter().collect(),
            script: Mutex::new(VecDeque::new()),
            fallback: ScriptedOutcome::Complete,
            rejection: None,
            bridge_calls: AtomicUsize::new(0),
            health: HealthTracker::default(),
        }
    }

    /// Queue an outcome.
    pub fn then(self, outcome: ScriptedOutcome) -> Self {
        self.script.lock().push_back(outcome);
        self
    }

    /// Outcome once the queue is drained.
    pub fn always(mut self, outcome: ScriptedOutcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Fail `validate()` with a code.
    pub fn rejecting(mut self, code: BridgeErrorCode, message: &str) -> Self {
        self.rejection = Some(ValidationOutcome::reject(code, message));
        self
    }

    /// Number of `bridge()` calls so far.
    pub fn bridge_calls(&self) -> usize {
        self.bridge_calls.load(Ordering::SeqCst)
    }

    fn tx_hash(&self, n: usize) -> String {
        format!("0x{:02x}{:062x}", self.kind as u8, n)
    }
}

#[async_trait]
impl ProtocolAdapter for ScriptedAdapter {
    fn kind(&self) -> ProtocolKind {
        self.kind
    }

    fn supports(&self, source: ChainId, destination: ChainId) -> bool {
        self.routes.contains(&(source, destination))
    }

    async fn estimate(&self, params: &BridgeParams) -> Result<FeeEstimate, AdapterError> {
        if !self.supports(params.source_chain, params.destination_chain) {
            return Err(AdapterError::RouteUnavailable {
                source_chain: params.source_chain,
                destination: params.destination_chain,
            });
        }
        Ok(FeeEstimate {
            fee: "0".to_string(),
            estimated_time_ms: 1_000,
            gas_note: None,
        })
    }

    async fn validate(&self, params: &BridgeParams) -> ValidationOutcome {
        if let Some(rejection) = &self.rejection {
            return rejection.clone();
        }
        if !self.supports(params.source_chain, params.destination_chain) {
            return ValidationOutcome::reject(BridgeErrorCode::NoRoute, "unsupported route");
        }
        ValidationOutcome::ok()
    }

    async fn bridge(&self, params: &BridgeParams, progress: &dyn ProgressReporter) -> BridgeResult {
        let n = self.bridge_calls.fetch_add(1, Ordering::SeqCst) + 1;
        progress.report(&params.intent_id, ProgressStage::Validating, None);
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match outcome {
            ScriptedOutcome::Complete => BridgeResult::completed(
                self.tx_hash(n),
                BridgeDetails {
                    destination_tx_hash: Some(self.tx_hash(n + 1000)),
                    ..BridgeDetails::default()
                },
            ),
            ScriptedOutcome::AwaitMint => BridgeResult::awaiting_mint(
                self.tx_hash(n),
                BridgeDetails {
                    message_hash: Some(format!("0x{:064x}", n)),
                    attestation: Some(format!("0xa{:063x}", n)),
                    ..BridgeDetails::default()
                },
            ),
            ScriptedOutcome::Fail(code, message) => BridgeResult::failure(Some(code), message),
            ScriptedOutcome::FailRaw(message) => BridgeResult::failure(None, message),
            ScriptedOutcome::Hang(duration) => {
                tokio::time::sleep(duration).await;
                BridgeResult::completed(self.tx_hash(n), BridgeDetails::default())
            }
        }
    }

    fn health_tracker(&self) -> &HealthTracker {
        &self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::NoopProgress;

    fn params() -> BridgeParams {
        BridgeParams {
            intent_id: "i-1".into(),
            source_chain: ChainId::Ethereum,
            destination_chain: ChainId::Base,
            amount: "10".into(),
            token: "usdc".into(),
            source_address: "0x1111111111111111111111111111111111111111".into(),
            destination_address: "0x2222222222222222222222222222222222222222".into(),
        }
    }

    #[tokio::test]
    async fn test_script_then_fallback() {
        let adapter = ScriptedAdapter::new(
            ProtocolKind::Attestation,
            [(ChainId::Ethereum, ChainId::Base)],
        )
        .then(ScriptedOutcome::Fail(BridgeErrorCode::NonceError, "nonce too low".into()));

        let first = adapter.bridge(&params(), &NoopProgress).await;
        assert_eq!(first.error_code, Some(BridgeErrorCode::NonceError));
        let second = adapter.bridge(&params(), &NoopProgress).await;
        assert!(second.success);
        assert_eq!(adapter.bridge_calls(), 2);
    }

    #[tokio::test]
    async fn test_tx_hash_is_evm_shaped() {
        let adapter = ScriptedAdapter::new(
            ProtocolKind::LiquiditySwap,
            [(ChainId::Ethereum, ChainId::Base)],
        );
        let result = adapter.bridge(&params(), &NoopProgress).await;
        let hash = result.source_tx_hash.unwrap();
        assert_eq!(hash.len(), 66);
    }
}
