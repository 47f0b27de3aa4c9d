//! # Subsystem Container
//!
//! Holds every subsystem instance, wired in dependency order:
//!
//! ```text
//! Level 0: chain clients, intent store
//! Level 1: protocol adapters (xp-01) → bridge manager (xp-02)
//! Level 2: purchase engine (xp-04)
//! Level 3: event ingestion (xp-05), status (xp-06)
//! Level 4: API gateway state (xp-07)
//! ```
//!
//! Chain access is simulated in-process; swapping in real clients only
//! touches `LazyClientProvider` and the adapter service ports.

use std::sync::Arc;
use tracing::info;

use xp_01_protocol_adapters::{
    AttestationBridge, AttestationConfig, ChainClientProvider, ContractEventBridge,
    ContractEventConfig, LiquiditySwapBridge, LiquiditySwapConfig, SimulatedAttestationService,
    SimulatedSwapRouter,
};
use xp_02_bridge_manager::BridgeManager;
use xp_03_intent_store::{InMemoryIntentStore, IntentService};
use xp_04_purchase_engine::{PurchaseEngine, SimulatedMintClaimer, SimulatedPurchaseExecutor};
use xp_05_event_ingestion::IngestionService;
use xp_06_status_poller::{StatusPoller, StatusService};
use xp_07_api_gateway::AppState;

use crate::container::clients::LazyClientProvider;
use crate::container::config::{ConfigError, NodeConfig};

/// Central container holding all subsystem instances.
pub struct SubsystemContainer {
    pub config: NodeConfig,
    pub clients: Arc<LazyClientProvider>,
    pub intents: IntentService,
    pub bridges: Arc<BridgeManager>,
    pub engine: PurchaseEngine,
    pub status: StatusService,
    pub ingestor: Arc<IngestionService>,
    pub poller: StatusPoller,
}

impl SubsystemContainer {
    /// Build and wire every subsystem.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        // Level 0
        let clients = Arc::new(LazyClientProvider::simulated());
        let provider: Arc<dyn ChainClientProvider> = clients.clone();
        let intents = IntentService::new(Arc::new(InMemoryIntentStore::new()));

        // Level 1
        let bridges = Arc::new(build_bridges(&config, provider)?);
        info!(
            protocols = bridges.adapters().len(),
            "[node] Bridge manager initialized"
        );

        // Level 2
        let engine = PurchaseEngine::new(
            config.engine.clone(),
            intents.clone(),
            bridges.clone(),
            Arc::new(SimulatedMintClaimer::new()),
            Arc::new(SimulatedPurchaseExecutor::new()),
        )
        .map_err(subsystem)?;

        // Level 3
        let ingestor = Arc::new(
            IngestionService::new(config.ingest.clone(), Arc::new(engine.clone()))
                .map_err(subsystem)?,
        );
        let status = StatusService::new(intents.clone());
        let poller =
            StatusPoller::new(Arc::new(status.clone()), config.poller.clone()).map_err(subsystem)?;

        info!("[node] All subsystems initialized");
        Ok(Self {
            config,
            clients,
            intents,
            bridges,
            engine,
            status,
            ingestor,
            poller,
        })
    }

    /// Shared state for the HTTP gateway.
    pub fn app_state(&self) -> AppState {
        AppState {
            engine: self.engine.clone(),
            status: self.status.clone(),
            ingestor: self.ingestor.clone(),
            admin_token: Arc::from(self.config.gateway.admin_token.as_str()),
        }
    }
}

fn build_bridges(
    config: &NodeConfig,
    clients: Arc<dyn ChainClientProvider>,
) -> Result<BridgeManager, ConfigError> {
    let swap = LiquiditySwapConfig::default();
    let router = SimulatedSwapRouter::new(
        swap.sources.iter().map(|source| (*source, swap.destination)),
        swap.fee_bps,
    );

    BridgeManager::new(config.bridges.clone())
        .and_then(|m| {
            m.with_adapter(Arc::new(AttestationBridge::new(
                AttestationConfig::default(),
                clients.clone(),
                Arc::new(SimulatedAttestationService::new()),
            )))
        })
        .and_then(|m| {
            m.with_adapter(Arc::new(LiquiditySwapBridge::new(
                swap,
                clients.clone(),
                Arc::new(router),
            )))
        })
        .and_then(|m| {
            m.with_adapter(Arc::new(ContractEventBridge::new(
                ContractEventConfig::default(),
                clients,
            )))
        })
        .map_err(subsystem)
}

fn subsystem(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Subsystem(e.to_string())
}
