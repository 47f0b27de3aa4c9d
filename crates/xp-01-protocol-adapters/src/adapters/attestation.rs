//! Attestation Bridge Adapter
//!
//! Burn on the source chain, wait for an attestation of the burn message,
//! then leave the destination mint to the purchase engine.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared_types::{BridgeErrorCode, ChainId, ProtocolKind};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::{
    AdapterError, BridgeDetails, BridgeParams, BridgeResult, FeeEstimate, HealthTracker,
    ProgressStage, ValidationOutcome,
};
use crate::ports::inbound::ProtocolAdapter;
use crate::ports::outbound::{
    AttestationService, ChainClientProvider, ProgressReporter, TransferKind, TransferRequest,
};

/// Attestation bridge configuration.
#[derive(Clone, Debug)]
pub struct AttestationConfig {
    /// Chains that can burn.
    pub sources: Vec<ChainId>,
    /// Chain that mints.
    pub destination: ChainId,
    pub min_amount: Decimal,
    pub flat_fee: Decimal,
    /// Upper bound on attestation polling.
    pub attestation_timeout: Duration,
    pub poll_interval: Duration,
    /// Typical end-to-end time per source chain.
    pub estimated_time_ms: HashMap<ChainId, u64>,
}

impl Default for AttestationConfig {
    fn default() -> Self {
        Self {
            sources: vec![ChainId::Ethereum, ChainId::Avalanche, ChainId::Solana],
            destination: ChainId::Base,
            min_amount: Decimal::ONE,
            flat_fee: Decimal::new(5, 2),
            attestation_timeout: Duration::from_secs(20 * 60),
            poll_interval: Duration::from_secs(5),
            estimated_time_ms: HashMap::from([
                (ChainId::Ethereum, 15 * 60 * 1000),
                (ChainId::Avalanche, 60 * 1000),
                (ChainId::Solana, 60 * 1000),
            ]),
        }
    }
}

/// Burn / attest / mint bridge.
pub struct AttestationBridge {
    config: AttestationConfig,
    clients: Arc<dyn ChainClientProvider>,
    attestation: Arc<dyn AttestationService>,
    health: HealthTracker,
}

impl AttestationBridge {
    /// Create the adapter.
    pub fn new(
        config: AttestationConfig,
        clients: Arc<dyn ChainClientProvider>,
        attestation: Arc<dyn AttestationService>,
    ) -> Self {
        Self {
            config,
            clients,
            attestation,
            health: HealthTracker::default(),
        }
    }

    async fn poll_attestation(&self, message_hash: &str) -> String {
        loop {
            match self.attestation.fetch_attestation(message_hash).await {
                Ok(Some(attestation)) => return attestation,
                Ok(None) => {}
                Err(e) => {
                    warn!(message_hash = %message_hash, error = %e, "[xp-01] Attestation poll failed");
                }
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn run(
        &self,
        params: &BridgeParams,
        progress: &dyn ProgressReporter,
        source_tx: &mut Option<String>,
    ) -> Result<BridgeResult, AdapterError> {
        let client = self
            .clients
            .client(params.source_chain)
            .ok_or(AdapterError::MissingClient(params.source_chain))?;

        progress.report(&params.intent_id, ProgressStage::Approving, None);
        progress.report(&params.intent_id, ProgressStage::Broadcasting, None);
        let tx_hash = client
            .submit_transfer(&TransferRequest {
                kind: TransferKind::Burn,
                from: params.source_address.clone(),
                to: params.destination_address.clone(),
                amount: params.amount.clone(),
                token: params.token.clone(),
                memo: Some(params.destination_chain.to_string()),
            })
            .await?;
        *source_tx = Some(tx_hash.clone());

        progress.report(&params.intent_id, ProgressStage::Confirming, Some(&tx_hash));
        let confirmation = client.confirm(&tx_hash).await?;
        if !confirmation.success {
            return Err(AdapterError::Network(format!("burn {} reverted", tx_hash)));
        }
        let message_hash = confirmation
            .message_hash
            .ok_or_else(|| AdapterError::Network(format!("burn {} emitted no message", tx_hash)))?;

        progress.report(
            &params.intent_id,
            ProgressStage::AwaitingAttestation,
            Some(&message_hash),
        );
        let attestation = tokio::time::timeout(
            self.config.attestation_timeout,
            self.poll_attestation(&message_hash),
        )
        .await
        .map_err(|_| AdapterError::AttestationTimeout {
            message_hash: message_hash.clone(),
        })?;

        info!(
            intent_id = %params.intent_id,
            tx_hash = %tx_hash,
            "[xp-01] Burn attested, mint pending"
        );
        Ok(BridgeResult::awaiting_mint(
            tx_hash,
            BridgeDetails {
                message_hash: Some(message_hash),
                attestation: Some(attestation),
                ..BridgeDetails::default()
            },
        ))
    }
}

#[async_trait]
impl ProtocolAdapter for AttestationBridge {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Attestation
    }

    fn supports(&self, source: ChainId, destination: ChainId) -> bool {
        destination == self.config.destination && self.config.sources.contains(&source)
    }

    async fn estimate(&self, params: &BridgeParams) -> Result<FeeEstimate, AdapterError> {
        if !self.supports(params.source_chain, params.destination_chain) {
            return Err(AdapterError::RouteUnavailable {
                source_chain: params.source_chain,
                destination: params.destination_chain,
            });
        }
        Ok(FeeEstimate {
            fee: self.config.flat_fee.normalize().to_string(),
            estimated_time_ms: self
                .config
                .estimated_time_ms
                .get(&params.source_chain)
                .copied()
                .unwrap_or(15 * 60 * 1000),
            gas_note: Some("destination mint gas paid by relayer".to_string()),
        })
    }

    async fn validate(&self, params: &BridgeParams) -> ValidationOutcome {
        if !self.supports(params.source_chain, params.destination_chain) {
            return ValidationOutcome::reject(
                BridgeErrorCode::NoRoute,
                format!(
                    "attestation bridge does not support {} -> {}",
                    params.source_chain, params.destination_chain
                ),
            );
        }
        params.check_with_minimum(self.config.min_amount)
    }

    async fn bridge(&self, params: &BridgeParams, progress: &dyn ProgressReporter) -> BridgeResult {
        progress.report(&params.intent_id, ProgressStage::Validating, None);
        let mut source_tx = None;
        match self.run(params, progress, &mut source_tx).await {
            Ok(result) => result,
            Err(e) => {
                warn!(intent_id = %params.intent_id, error = %e, "[xp-01] Attestation bridge failed");
                progress.report(&params.intent_id, ProgressStage::Failed, Some(&e.to_string()));
                BridgeResult::failure(Some(e.code()), e.to_string()).with_source_tx(source_tx)
            }
        }
    }

    fn health_tracker(&self) -> &HealthTracker {
        &self.health
    }
}
