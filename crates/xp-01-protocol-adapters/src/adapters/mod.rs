//! # Adapters Module
//!
//! The three shipped bridge protocols, simulated outbound ports and a
//! scripted adapter for tests.

pub mod attestation;
pub mod contract_event;
pub mod liquidity_swap;
pub mod scripted;
pub mod simulated;

pub use attestation::{AttestationBridge, AttestationConfig};
pub use contract_event::{ContractEventBridge, ContractEventConfig};
pub use liquidity_swap::{LiquiditySwapBridge, LiquiditySwapConfig};
pub use scripted::{ScriptedAdapter, ScriptedOutcome};
pub use simulated::{
    SimulatedAttestationService, SimulatedChainClient, SimulatedSwapRouter, StaticClientProvider,
};
