//! # Inbound Ports
//!
//! The contract every bridge protocol implements. The bridge manager only
//! ever talks to adapters through this trait.

use async_trait::async_trait;
use shared_types::{now_millis, ChainId, ProtocolKind};

use crate::domain::{
    AdapterError, BridgeParams, BridgeResult, FeeEstimate, HealthTracker, ProtocolHealth,
    ValidationOutcome,
};
use crate::ports::outbound::ProgressReporter;

/// Protocol adapter - inbound port.
#[async_trait]
pub trait ProtocolAdapter: Send + Sync {
    /// Protocol implemented by this adapter.
    fn kind(&self) -> ProtocolKind;

    /// Display name (defaults to the protocol wire name).
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether the adapter can move funds from `source` to `destination`. Pure.
    fn supports(&self, source: ChainId, destination: ChainId) -> bool;

    /// Fee and timing estimate. No side effects.
    async fn estimate(&self, params: &BridgeParams) -> Result<FeeEstimate, AdapterError>;

    /// Route, address and amount checks. Never touches a chain.
    async fn validate(&self, params: &BridgeParams) -> ValidationOutcome;

    /// Perform the bridge. Errors are reported inside the result.
    async fn bridge(&self, params: &BridgeParams, progress: &dyn ProgressReporter) -> BridgeResult;

    /// Counters written by the bridge manager.
    fn health_tracker(&self) -> &HealthTracker;

    /// Current health snapshot.
    fn get_health(&self) -> ProtocolHealth {
        self.health_tracker().snapshot(now_millis())
    }
}
