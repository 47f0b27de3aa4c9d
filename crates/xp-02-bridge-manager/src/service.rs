//! # Bridge Manager Service
//!
//! Registry of protocol adapters plus the execution wrapper that times,
//! scores and classifies every bridge call.

use shared_types::{now_millis, ChainId, ProtocolKind};
use std::collections::BTreeMap;
use std::pin::pin;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use xp_01_protocol_adapters::{
    BridgeParams, BridgeResult, ProgressReporter, ProtocolAdapter, ProtocolHealth,
};

use crate::algorithms::{classify_error, rank_candidates, Candidate};
use crate::domain::{BridgeExecution, BridgeManagerConfig, ManagerError};

/// Adapter registry, selection and health cache.
pub struct BridgeManager {
    config: BridgeManagerConfig,
    adapters: Vec<Arc<dyn ProtocolAdapter>>,
}

impl BridgeManager {
    /// Create an empty manager.
    pub fn new(config: BridgeManagerConfig) -> Result<Self, ManagerError> {
        config.validate()?;
        Ok(Self {
            config,
            adapters: Vec::new(),
        })
    }

    /// Register an adapter. One adapter per protocol.
    pub fn register(&mut self, adapter: Arc<dyn ProtocolAdapter>) -> Result<(), ManagerError> {
        let kind = adapter.kind();
        if self.adapters.iter().any(|a| a.kind() == kind) {
            return Err(ManagerError::DuplicateAdapter(kind));
        }
        info!(protocol = %kind, "[xp-02] Adapter registered");
        self.adapters.push(adapter);
        Ok(())
    }

    /// Builder form of `register`.
    pub fn with_adapter(mut self, adapter: Arc<dyn ProtocolAdapter>) -> Result<Self, ManagerError> {
        self.register(adapter)?;
        Ok(self)
    }

    /// Registered adapters in registration order.
    pub fn adapters(&self) -> &[Arc<dyn ProtocolAdapter>] {
        &self.adapters
    }

    /// Adapter for a protocol.
    pub fn adapter(&self, kind: ProtocolKind) -> Option<Arc<dyn ProtocolAdapter>> {
        self.adapters.iter().find(|a| a.kind() == kind).cloned()
    }

    /// Capable adapters for a route, best first.
    pub fn candidates(
        &self,
        source: ChainId,
        destination: ChainId,
    ) -> Result<Vec<Arc<dyn ProtocolAdapter>>, ManagerError> {
        let now = now_millis();
        let capable: Vec<Candidate> = self
            .adapters
            .iter()
            .enumerate()
            .filter(|(_, a)| a.supports(source, destination))
            .map(|(registration, a)| {
                let health = a.health_tracker().snapshot(now);
                Candidate {
                    protocol: a.kind(),
                    registration,
                    healthy: health.is_healthy,
                    success_rate: health.success_rate,
                }
            })
            .collect();

        let ranked = rank_candidates(
            capable,
            &self.config.preference,
            self.config.min_success_rate,
        );
        if ranked.is_empty() {
            return Err(ManagerError::NoRoute {
                source_chain: source,
                destination,
            });
        }
        Ok(ranked
            .iter()
            .map(|c| self.adapters[c.registration].clone())
            .collect())
    }

    /// Best adapter for a route.
    pub fn select(
        &self,
        source: ChainId,
        destination: ChainId,
    ) -> Result<Arc<dyn ProtocolAdapter>, ManagerError> {
        let mut candidates = self.candidates(source, destination)?;
        let selected = candidates.remove(0);
        debug!(
            source = %source,
            destination = %destination,
            protocol = %selected.kind(),
            "[xp-02] Adapter selected"
        );
        Ok(selected)
    }

    /// Order in which to try adapters for an intent that already tried
    /// `tried`: untried capable adapters best first, then tried ones, most
    /// recent first.
    pub fn fallback_order(
        &self,
        source: ChainId,
        destination: ChainId,
        tried: &[ProtocolKind],
    ) -> Result<Vec<Arc<dyn ProtocolAdapter>>, ManagerError> {
        let candidates = self.candidates(source, destination)?;
        let (mut order, retries): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|a| !tried.contains(&a.kind()));
        for kind in tried.iter().rev() {
            if let Some(adapter) = retries.iter().find(|a| a.kind() == *kind) {
                order.push(adapter.clone());
            }
        }
        Ok(order)
    }

    /// Next adapter for an intent that already tried `tried`: the best
    /// untried capable adapter, otherwise the last tried one for a plain retry.
    pub fn next_candidate(
        &self,
        source: ChainId,
        destination: ChainId,
        tried: &[ProtocolKind],
    ) -> Result<Arc<dyn ProtocolAdapter>, ManagerError> {
        let mut order = self.fallback_order(source, destination, tried)?;
        if order.is_empty() {
            return Err(ManagerError::NoRoute {
                source_chain: source,
                destination,
            });
        }
        Ok(order.remove(0))
    }

    /// Run the adapter's pre-flight checks. A rejection comes back as a
    /// failed execution with `rejected` set; the adapter never bridged.
    pub async fn validate(
        &self,
        adapter: &dyn ProtocolAdapter,
        params: &BridgeParams,
    ) -> Result<(), BridgeExecution> {
        let protocol = adapter.kind();
        let started = Instant::now();
        let validation = adapter.validate(params).await;
        if validation.valid {
            return Ok(());
        }
        let message = validation
            .error
            .unwrap_or_else(|| "validation failed".to_string());
        let code = classify_error(validation.error_code, &message);
        warn!(
            intent_id = %params.intent_id,
            protocol = %protocol,
            code = %code,
            error = %message,
            "[xp-02] Bridge parameters rejected"
        );
        Err(BridgeExecution {
            protocol,
            result: BridgeResult::failure(Some(code), message),
            elapsed_ms: started.elapsed().as_millis() as u64,
            rejected: true,
            overdue: false,
        })
    }

    /// Bridge without validating. The adapter call always runs to
    /// completion: once `bridge_timeout` passes the call is flagged overdue
    /// and still awaited, since a submitted transfer cannot be aborted.
    /// Records health and classifies failures.
    pub async fn bridge(
        &self,
        adapter: &dyn ProtocolAdapter,
        params: &BridgeParams,
        progress: &dyn ProgressReporter,
    ) -> BridgeExecution {
        let protocol = adapter.kind();
        let started = Instant::now();

        let mut call = pin!(adapter.bridge(params, progress));
        let first = tokio::time::timeout(self.config.bridge_timeout, &mut call).await;
        let (mut result, overdue) = match first {
            Ok(result) => (result, false),
            Err(_) => {
                warn!(
                    intent_id = %params.intent_id,
                    protocol = %protocol,
                    timeout_secs = self.config.bridge_timeout.as_secs_f64(),
                    "[xp-02] Bridge overdue, waiting for the submitted call to settle"
                );
                (call.await, true)
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let tracker = adapter.health_tracker();
        if result.success {
            tracker.record_success(elapsed_ms);
            info!(
                intent_id = %params.intent_id,
                protocol = %protocol,
                elapsed_ms,
                overdue,
                requires_mint = result.requires_mint,
                "[xp-02] Bridge succeeded"
            );
        } else {
            tracker.record_failure(elapsed_ms, now_millis());
            let code = classify_error(result.error_code, result.error.as_deref().unwrap_or(""));
            result.error_code = Some(code);
            warn!(
                intent_id = %params.intent_id,
                protocol = %protocol,
                code = %code,
                overdue,
                source_tx = result.source_tx_hash.as_deref().unwrap_or(""),
                error = result.error.as_deref().unwrap_or(""),
                "[xp-02] Bridge failed"
            );
        }

        BridgeExecution {
            protocol,
            result,
            elapsed_ms,
            rejected: false,
            overdue,
        }
    }

    /// Validate then bridge.
    pub async fn execute(
        &self,
        adapter: &dyn ProtocolAdapter,
        params: &BridgeParams,
        progress: &dyn ProgressReporter,
    ) -> BridgeExecution {
        if let Err(rejection) = self.validate(adapter, params).await {
            return rejection;
        }
        self.bridge(adapter, params, progress).await
    }

    /// Health of every adapter keyed by protocol name.
    pub fn get_health(&self) -> BTreeMap<String, ProtocolHealth> {
        self.adapters
            .iter()
            .map(|a| (a.name().to_string(), a.get_health()))
            .collect()
    }

    /// Reset every adapter's health counters.
    pub fn clear_health_cache(&self) {
        for adapter in &self.adapters {
            adapter.health_tracker().reset();
        }
        info!(adapters = self.adapters.len(), "[xp-02] Health cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::BridgeErrorCode;
    use std::time::Duration;
    use xp_01_protocol_adapters::{NoopProgress, ScriptedAdapter, ScriptedOutcome};

    const ETH_BASE: (ChainId, ChainId) = (ChainId::Ethereum, ChainId::Base);
    const NEAR_BASE: (ChainId, ChainId) = (ChainId::Near, ChainId::Base);

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

    fn manager(config: BridgeManagerConfig) -> BridgeManager {
        BridgeManager::new(config)
            .unwrap()
            .with_adapter(Arc::new(ScriptedAdapter::new(
                ProtocolKind::Attestation,
                [ETH_BASE],
            )))
            .unwrap()
            .with_adapter(Arc::new(ScriptedAdapter::new(
                ProtocolKind::LiquiditySwap,
                [ETH_BASE, NEAR_BASE],
            )))
            .unwrap()
    }

    #[test]
    fn test_unsupported_adapters_never_selected() {
        let manager = manager(BridgeManagerConfig::default());
        let near = manager.candidates(ChainId::Near, ChainId::Base).unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].kind(), ProtocolKind::LiquiditySwap);
    }

    #[test]
    fn test_no_route() {
        let manager = manager(BridgeManagerConfig::default());
        let err = manager.select(ChainId::Stacks, ChainId::Base).err().unwrap();
        assert_eq!(err.code(), BridgeErrorCode::NoRoute);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut manager = manager(BridgeManagerConfig::default());
        let err = manager
            .register(Arc::new(ScriptedAdapter::new(ProtocolKind::Attestation, [])))
            .unwrap_err();
        assert_eq!(err, ManagerError::DuplicateAdapter(ProtocolKind::Attestation));
    }

    #[test]
    fn test_preference_order() {
        let manager = manager(BridgeManagerConfig {
            preference: vec![ProtocolKind::LiquiditySwap],
            ..Default::default()
        });
        let selected = manager.select(ChainId::Ethereum, ChainId::Base).unwrap();
        assert_eq!(selected.kind(), ProtocolKind::LiquiditySwap);
    }

    #[test]
    fn test_unhealthy_adapter_demoted() {
        let manager = manager(BridgeManagerConfig::default());
        let attestation = manager.adapter(ProtocolKind::Attestation).unwrap();
        for _ in 0..3 {
            attestation.health_tracker().record_failure(10, now_millis());
        }
        let selected = manager.select(ChainId::Ethereum, ChainId::Base).unwrap();
        assert_eq!(selected.kind(), ProtocolKind::LiquiditySwap);

        manager.clear_health_cache();
        let selected = manager.select(ChainId::Ethereum, ChainId::Base).unwrap();
        assert_eq!(selected.kind(), ProtocolKind::Attestation);
    }

    #[test]
    fn test_next_candidate_prefers_untried() {
        let manager = manager(BridgeManagerConfig::default());
        let next = manager
            .next_candidate(ChainId::Ethereum, ChainId::Base, &[ProtocolKind::Attestation])
            .unwrap();
        assert_eq!(next.kind(), ProtocolKind::LiquiditySwap);

        // only one capable adapter: plain retry
        let next = manager
            .next_candidate(ChainId::Near, ChainId::Base, &[ProtocolKind::LiquiditySwap])
            .unwrap();
        assert_eq!(next.kind(), ProtocolKind::LiquiditySwap);

        let next = manager
            .next_candidate(
                ChainId::Ethereum,
                ChainId::Base,
                &[ProtocolKind::Attestation, ProtocolKind::LiquiditySwap],
            )
            .unwrap();
        assert_eq!(next.kind(), ProtocolKind::LiquiditySwap);
    }

    #[tokio::test]
    async fn test_execute_records_health_and_classifies() {
        let adapter = ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE])
            .then(ScriptedOutcome::FailRaw("nonce too low".into()));
        let manager = BridgeManager::new(BridgeManagerConfig::default()).unwrap();

        let execution = manager.execute(&adapter, &params(), &NoopProgress).await;
        assert_eq!(execution.error_code(), Some(BridgeErrorCode::NonceError));
        assert!(!execution.rejected);

        let execution = manager.execute(&adapter, &params(), &NoopProgress).await;
        assert!(execution.result.success);

        let health = adapter.get_health();
        assert_eq!(health.success_count, 1);
        assert_eq!(health.failure_count, 1);
    }

    #[tokio::test]
    async fn test_overdue_bridge_is_not_abandoned() {
        let adapter = ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE])
            .then(ScriptedOutcome::Hang(Duration::from_millis(100)));
        let manager = BridgeManager::new(BridgeManagerConfig {
            bridge_timeout: Duration::from_millis(20),
            ..Default::default()
        })
        .unwrap();

        let execution = manager.execute(&adapter, &params(), &NoopProgress).await;
        assert!(execution.overdue);
        assert!(execution.result.success);
        assert!(execution.result.source_tx_hash.is_some());
        assert!(execution.elapsed_ms >= 100);
        assert_eq!(adapter.bridge_calls(), 1);
        assert_eq!(adapter.get_health().success_count, 1);
    }

    #[tokio::test]
    async fn test_prompt_bridge_is_not_overdue() {
        let adapter = ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE]);
        let manager = BridgeManager::new(BridgeManagerConfig::default()).unwrap();
        let execution = manager.execute(&adapter, &params(), &NoopProgress).await;
        assert!(!execution.overdue);
        assert!(execution.result.success);
    }

    #[tokio::test]
    async fn test_validation_rejection_skips_bridge() {
        let adapter = ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE])
            .rejecting(BridgeErrorCode::InvalidAddress, "bad recipient");
        let manager = BridgeManager::new(BridgeManagerConfig::default()).unwrap();

        let execution = manager.execute(&adapter, &params(), &NoopProgress).await;
        assert!(execution.rejected);
        assert_eq!(execution.error_code(), Some(BridgeErrorCode::InvalidAddress));
        assert_eq!(adapter.bridge_calls(), 0);
        assert_eq!(adapter.get_health().failure_count, 0);
    }

    #[test]
    fn test_fallback_order() {
        let manager = manager(BridgeManagerConfig::default());
        let kinds = |tried: &[ProtocolKind]| -> Vec<ProtocolKind> {
            manager
                .fallback_order(ChainId::Ethereum, ChainId::Base, tried)
                .unwrap()
                .iter()
                .map(|a| a.kind())
                .collect()
        };
        assert_eq!(
            kinds(&[]),
            vec![ProtocolKind::Attestation, ProtocolKind::LiquiditySwap]
        );
        assert_eq!(
            kinds(&[ProtocolKind::Attestation]),
            vec![ProtocolKind::LiquiditySwap, ProtocolKind::Attestation]
        );
        assert_eq!(
            kinds(&[ProtocolKind::Attestation, ProtocolKind::LiquiditySwap]),
            vec![ProtocolKind::LiquiditySwap, ProtocolKind::Attestation]
        );
    }

    #[tokio::test]
    async fn test_validate_alone_does_not_bridge() {
        let manager = manager(BridgeManagerConfig::default());
        let strict = ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE])
            .rejecting(BridgeErrorCode::InvalidAmount, "below minimum");
        let rejection = manager.validate(&strict, &params()).await.unwrap_err();
        assert!(rejection.rejected);
        assert_eq!(rejection.error_code(), Some(BridgeErrorCode::InvalidAmount));

        let open = ScriptedAdapter::new(ProtocolKind::LiquiditySwap, [ETH_BASE]);
        assert!(manager.validate(&open, &params()).await.is_ok());
        assert_eq!(open.bridge_calls(), 0);
    }

    #[test]
    fn test_get_health_keys() {
        let manager = manager(BridgeManagerConfig::default());
        let health = manager.get_health();
        assert!(health.contains_key("attestation"));
        assert!(health.contains_key("liquidity_swap"));
    }
}
