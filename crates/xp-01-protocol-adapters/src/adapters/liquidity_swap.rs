//! Liquidity Swap Adapter
//!
//! Quote a route, deposit on the source chain, and let the router settle
//! natively on the destination. No mint step.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared_types::{parse_amount, BridgeErrorCode, ChainId, ProtocolKind};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    AdapterError, BridgeDetails, BridgeParams, BridgeResult, FeeEstimate, HealthTracker,
    ProgressStage, ValidationOutcome,
};
use crate::ports::inbound::ProtocolAdapter;
use crate::ports::outbound::{
    ChainClientProvider, ProgressReporter, SwapRouter, TransferKind, TransferRequest,
};

/// Liquidity swap configuration.
#[derive(Clone, Debug)]
pub struct LiquiditySwapConfig {
    pub sources: Vec<ChainId>,
    pub destination: ChainId,
    /// Fee in basis points of the amount.
    pub fee_bps: u32,
    pub min_amount: Decimal,
    pub estimated_time_ms: u64,
}

impl Default for LiquiditySwapConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                ChainId::Near,
                ChainId::Solana,
                ChainId::Ethereum,
                ChainId::Avalanche,
            ],
            destination: ChainId::Base,
            fee_bps: 30,
            min_amount: Decimal::new(1, 2),
            estimated_time_ms: 2 * 60 * 1000,
        }
    }
}

/// Liquidity-network bridge.
pub struct LiquiditySwapBridge {
    config: LiquiditySwapConfig,
    clients: Arc<dyn ChainClientProvider>,
    router: Arc<dyn SwapRouter>,
    health: HealthTracker,
}

impl LiquiditySwapBridge {
    /// Create the adapter.
    pub fn new(
        config: LiquiditySwapConfig,
        clients: Arc<dyn ChainClientProvider>,
        router: Arc<dyn SwapRouter>,
    ) -> Self {
        Self {
            config,
            clients,
            router,
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

        let quote = self.router.quote(params).await?;

        progress.report(&params.intent_id, ProgressStage::Broadcasting, None);
        let tx_hash = client
            .submit_transfer(&TransferRequest {
                kind: TransferKind::Deposit,
                from: params.source_address.clone(),
                to: quote.deposit_address.clone(),
                amount: params.amount.clone(),
                token: params.token.clone(),
                memo: Some(params.destination_address.clone()),
            })
            .await?;
        *source_tx = Some(tx_hash.clone());

        progress.report(&params.intent_id, ProgressStage::Confirming, Some(&tx_hash));
        let confirmation = client.confirm(&tx_hash).await?;
        if !confirmation.success {
            return Err(AdapterError::Network(format!("deposit {} reverted", tx_hash)));
        }

        let settlement = self.router.execute(&quote, &tx_hash).await?;
        progress.report(
            &params.intent_id,
            ProgressStage::Completed,
            Some(&settlement.destination_tx_hash),
        );
        info!(
            intent_id = %params.intent_id,
            quote_id = %quote.quote_id,
            destination_tx = %settlement.destination_tx_hash,
            "[xp-01] Swap settled"
        );

        Ok(BridgeResult::completed(
            tx_hash,
            BridgeDetails {
                destination_tx_hash: Some(settlement.destination_tx_hash),
                reference: Some(quote.quote_id),
                amount_out: Some(quote.amount_out),
                ..BridgeDetails::default()
            },
        ))
    }
}

#[async_trait]
impl ProtocolAdapter for LiquiditySwapBridge {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::LiquiditySwap
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
        let amount = parse_amount(&params.amount)?;
        Ok(FeeEstimate {
            fee: amount.bps(self.config.fee_bps).normalize().to_string(),
            estimated_time_ms: self.config.estimated_time_ms,
            gas_note: None,
        })
    }

    async fn validate(&self, params: &BridgeParams) -> ValidationOutcome {
        if !self.supports(params.source_chain, params.destination_chain) {
            return ValidationOutcome::reject(
                BridgeErrorCode::NoRoute,
                format!(
                    "liquidity swap does not support {} -> {}",
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
                warn!(intent_id = %params.intent_id, error = %e, "[xp-01] Liquidity swap failed");
                progress.report(&params.intent_id, ProgressStage::Failed, Some(&e.to_string()));
                BridgeResult::failure(Some(e.code()), e.to_string()).with_source_tx(source_tx)
            }
        }
    }

    fn health_tracker(&self) -> &HealthTracker {
        &self.health
    }
}
