//! Lazily built per-chain clients.

use once_cell::sync::OnceCell;
use shared_types::ChainId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use xp_01_protocol_adapters::{ChainClientProvider, SimulatedChainClient, SourceChainClient};

type ClientFactory = dyn Fn(ChainId) -> Arc<dyn SourceChainClient> + Send + Sync;

/// Builds each chain's client on first use and reuses it afterwards.
pub struct LazyClientProvider {
    slots: BTreeMap<ChainId, OnceCell<Arc<dyn SourceChainClient>>>,
    factory: Box<ClientFactory>,
}

impl LazyClientProvider {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(ChainId) -> Arc<dyn SourceChainClient> + Send + Sync + 'static,
    {
        Self {
            slots: ChainId::ALL.iter().map(|c| (*c, OnceCell::new())).collect(),
            factory: Box::new(factory),
        }
    }

    /// Provider backed by in-process simulated chains.
    pub fn simulated() -> Self {
        Self::new(|chain| Arc::new(SimulatedChainClient::new(chain)))
    }

    /// Chains whose client has been built.
    pub fn initialized(&self) -> Vec<ChainId> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(chain, _)| *chain)
            .collect()
    }
}

impl ChainClientProvider for LazyClientProvider {
    fn client(&self, chain: ChainId) -> Option<Arc<dyn SourceChainClient>> {
        let slot = self.slots.get(&chain)?;
        let client = slot.get_or_init(|| {
            info!(chain = %chain, "[node] Chain client initialized");
            (self.factory)(chain)
        });
        Some(client.clone())
    }
}
