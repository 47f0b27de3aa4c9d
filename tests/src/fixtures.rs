//! Shared builders for scenario tests.

use serde_json::{json, Value};
use shared_types::{ChainId, IntentRequest, ProtocolKind};
use std::sync::Arc;
use std::time::Duration;
use xp_01_protocol_adapters::ScriptedAdapter;
use xp_02_bridge_manager::{BridgeManager, BridgeManagerConfig};
use xp_03_intent_store::{InMemoryIntentStore, IntentService};
use xp_04_purchase_engine::{
    EngineConfig, PurchaseEngine, SimulatedMintClaimer, SimulatedPurchaseExecutor,
};
use xp_06_status_poller::{BackoffSchedule, PollerConfig, StatusPoller, StatusService};

pub const ETH_BASE: (ChainId, ChainId) = (ChainId::Ethereum, ChainId::Base);
pub const STACKS_BASE: (ChainId, ChainId) = (ChainId::Stacks, ChainId::Base);

pub const ETH_ADDRESS: &str = "0x1111111111111111111111111111111111111111";
pub const BASE_ADDRESS: &str = "0x2222222222222222222222222222222222222222";
pub const STACKS_SENDER: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";
pub const WEBHOOK_SECRET: &str = "scenario-secret";

/// Engine, its store and the simulated destination-side executors.
pub struct Stack {
    pub engine: PurchaseEngine,
    pub intents: IntentService,
    pub minter: Arc<SimulatedMintClaimer>,
    pub purchaser: Arc<SimulatedPurchaseExecutor>,
}

impl Stack {
    pub fn status(&self) -> StatusService {
        StatusService::new(self.intents.clone())
    }

    /// Poller over this stack's status service, polling every few ms.
    pub fn poller(&self) -> StatusPoller {
        StatusPoller::new(
            Arc::new(self.status()),
            PollerConfig {
                schedule: BackoffSchedule::fixed(Duration::from_millis(5)),
                max_polls: Some(400),
            },
        )
        .unwrap()
    }
}

/// Engine over scripted adapters, registered in order.
pub fn stack(adapters: &[Arc<ScriptedAdapter>], max_failures: u32) -> Stack {
    let mut manager = BridgeManager::new(BridgeManagerConfig {
        bridge_timeout: Duration::from_secs(2),
        ..Default::default()
    })
    .unwrap();
    for adapter in adapters {
        manager.register(adapter.clone()).unwrap();
    }

    let intents = IntentService::new(Arc::new(InMemoryIntentStore::new()));
    let minter = Arc::new(SimulatedMintClaimer::new());
    let purchaser = Arc::new(SimulatedPurchaseExecutor::new());
    let engine = PurchaseEngine::new(
        EngineConfig {
            max_failures,
            retry_delay: Duration::from_millis(1),
        },
        intents.clone(),
        Arc::new(manager),
        minter.clone(),
        purchaser.clone(),
    )
    .unwrap();

    Stack {
        engine,
        intents,
        minter,
        purchaser,
    }
}

pub fn swap_adapter() -> ScriptedAdapter {
    ScriptedAdapter::new(ProtocolKind::LiquiditySwap, [ETH_BASE])
}

/// Ethereum → Base purchase of `units` units.
pub fn eth_request(units: u64) -> IntentRequest {
    IntentRequest {
        id: None,
        source_chain: ChainId::Ethereum,
        destination_chain: ChainId::Base,
        amount: "10".into(),
        source_address: ETH_ADDRESS.into(),
        destination_address: BASE_ADDRESS.into(),
        token: "usdc".into(),
        units: Some(units),
    }
}

/// Successful Stacks transaction carrying one purchase print event.
pub fn purchase_tx(hash: &str, data: Value) -> Value {
    json!({
        "transaction_identifier": {"hash": hash},
        "metadata": {
            "sender": STACKS_SENDER,
            "success": true,
            "receipt": {"events": [{
                "type": "SmartContractEvent",
                "data": {"value": {"event": "bridge-purchase-initiated", "data": data}}
            }]}
        }
    })
}

/// Chainhook body applying `transactions` in one block.
pub fn chainhook(transactions: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "apply": [{"block_identifier": {"index": 150_000}, "transactions": transactions}]
    }))
    .unwrap()
}

pub fn bearer(secret: &str) -> String {
    format!("Bearer {}", secret)
}
