//! Contract-Event Bridge Adapter
//!
//! Calls the source bridge contract; once the call confirms, the emitted
//! event is relayed and settled on the destination.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared_types::{BridgeErrorCode, ChainId, ProtocolKind};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    AdapterError, BridgeDetails, BridgeParams, BridgeResult, FeeEstimate, HealthTracker,
    ProgressStage, ValidationOutcome,
};
use crate::ports::inbound::ProtocolAdapter;
use crate::ports::outbound::{
    ChainClientProvider, ProgressReporter, TransferKind, TransferRequest,
};

/// Contract-event bridge configuration.
#[derive(Clone, Debug)]
pub struct ContractEventConfig {
    pub source: ChainId,
    pub destination: ChainId,
    /// Bridge contract principal on the source chain.
    pub contract: String,
    pub min_amount: Decimal,
    pub flat_fee: Decimal,
    pub estimated_time_ms: u64,
}

impl Default for ContractEventConfig {
    fn default() -> Self {
        Self {
            source: ChainId::Stacks,
            destination: ChainId::Base,
            contract: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7.bridge-purchase".to_string(),
            min_amount: Decimal::ONE,
            flat_fee: Decimal::new(1, 1),
            estimated_time_ms: 10 * 60 * 1000,
        }
    }
}

/// Source-contract event relay bridge.
pub struct ContractEventBridge {
    config: ContractEventConfig,
    clients: Arc<dyn ChainClientProvider>,
    health: HealthTracker,
}

impl ContractEventBridge {
    /// Create the adapter.
    pub fn new(config: ContractEventConfig, clients: Arc<dyn ChainClientProvider>) -> Self {
        Self {
            config,
            clients,
            health: HealthTracker::default(),
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

        progress.report(&params.intent_id, ProgressStage::Broadcasting, None);
        let tx_hash = client
            .submit_transfer(&TransferRequest {
                kind: TransferKind::ContractCall,
                from: params.source_address.clone(),
                to: self.config.contract.clone(),
                amount: params.amount.clone(),
                token: params.token.clone(),
                memo: Some(params.destination_address.clone()),
            })
            .await?;
        *source_tx = Some(tx_hash.clone());

        progress.report(&params.intent_id, ProgressStage::Confirming, Some(&tx_hash));
        let confirmation = client.confirm(&tx_hash).await?;
        if !confirmation.success {
            return Err(AdapterError::Network(format!(
                "contract call {} aborted",
                tx_hash
            )));
        }

        progress.report(&params.intent_id, ProgressStage::Completed, Some(&tx_hash));
        info!(
            intent_id = %params.intent_id,
            tx_hash = %tx_hash,
            contract = %self.config.contract,
            "[xp-01] Contract event confirmed"
        );
        Ok(BridgeResult::completed(
            tx_hash,
            BridgeDetails {
                reference: Some(self.config.contract.clone()),
                ..BridgeDetails::default()
            },
        ))
    }
}

#[async_trait]
impl ProtocolAdapter for ContractEventBridge {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::ContractEvent
    }

    fn supports(&self, source: ChainId, destination: ChainId) -> bool {
        source == self.config.source && destination == self.config.destination
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
            estimated_time_ms: self.config.estimated_time_ms,
            gas_note: Some("source contract call fee paid in STX".to_string()),
        })
    }

    async fn validate(&self, params: &BridgeParams) -> ValidationOutcome {
        if !self.supports(params.source_chain, params.destination_chain) {
            return ValidationOutcome::reject(
                BridgeErrorCode::NoRoute,
                format!(
                    "contract-event bridge does not support {} -> {}",
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
                warn!(intent_id = %params.intent_id, error = %e, "[xp-01] Contract-event bridge failed");
                progress.report(&params.intent_id, ProgressStage::Failed, Some(&e.to_string()));
                BridgeResult::failure(Some(e.code()), e.to_string()).with_source_tx(source_tx)
            }
        }
    }

    fn health_tracker(&self) -> &HealthTracker {
        &self.health
    }
}
