//! Simulated destination steps with scripted failures.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::Intent;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use xp_01_protocol_adapters::BridgeDetails;

use crate::domain::StepError;
use crate::ports::{MintClaimer, PurchaseExecutor};

#[derive(Debug, Default)]
struct StepScript {
    failures: Mutex<VecDeque<StepError>>,
    calls: AtomicU64,
}

impl StepScript {
    fn call(&self) -> Result<u64, StepError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.failures.lock().pop_front() {
            Some(error) => Err(error),
            None => Ok(n),
        }
    }
}

/// Simulated destination mint.
#[derive(Debug, Default)]
pub struct SimulatedMintClaimer {
    script: StepScript,
}

impl SimulatedMintClaimer {
    /// Claimer that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next claim.
    pub fn fail_next(&self, error: StepError) {
        self.script.failures.lock().push_back(error);
    }

    /// Claims attempted.
    pub fn calls(&self) -> u64 {
        self.script.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MintClaimer for SimulatedMintClaimer {
    async fn claim(&self, intent: &Intent, details: &BridgeDetails) -> Result<String, StepError> {
        let n = self.script.call()?;
        debug!(
            intent_id = %intent.id,
            message_hash = details.message_hash.as_deref().unwrap_or("-"),
            "[xp-04] Simulated mint"
        );
        Ok(format!("0x{:02x}{:062x}", 0xa1, n))
    }
}

/// Simulated destination purchase.
#[derive(Debug, Default)]
pub struct SimulatedPurchaseExecutor {
    script: StepScript,
}

impl SimulatedPurchaseExecutor {
    /// Executor that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next purchase.
    pub fn fail_next(&self, error: StepError) {
        self.script.failures.lock().push_back(error);
    }

    /// Purchases attempted.
    pub fn calls(&self) -> u64 {
        self.script.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PurchaseExecutor for SimulatedPurchaseExecutor {
    async fn purchase(&self, intent: &Intent) -> Result<String, StepError> {
        let n = self.script.call()?;
        debug!(
            intent_id = %intent.id,
            recipient = %intent.destination_address,
            units = intent.units.unwrap_or(0),
            "[xp-04] Simulated purchase"
        );
        Ok(format!("0x{:02x}{:062x}", 0xb2, n))
    }
}
