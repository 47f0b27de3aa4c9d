//! # XP-01 Protocol Adapters
//!
//! Uniform contract over heterogeneous bridge protocols.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every bridge mechanism is wrapped behind `ProtocolAdapter` so the bridge
//! manager can select, execute and score them interchangeably:
//!
//! | Adapter | Routes | Settlement |
//! |---------|--------|------------|
//! | `AttestationBridge` | ethereum, avalanche, solana → base | burn, attest, mint |
//! | `LiquiditySwapBridge` | near, solana, ethereum, avalanche → base | native |
//! | `ContractEventBridge` | stacks → base | native |
//!
//! Adapter-internal failures are returned inside `BridgeResult`, never
//! panicked or thrown past the adapter boundary.
//!
//! ## Module Structure
//!
//! ```text
//! xp-01-protocol-adapters/
//! ├── domain/          # BridgeParams, BridgeResult, health, errors
//! ├── ports/           # ProtocolAdapter, chain/attestation/router ports
//! └── adapters/        # Shipped adapters, simulated ports, scripted adapter
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    AttestationBridge, AttestationConfig, ContractEventBridge, ContractEventConfig,
    LiquiditySwapBridge, LiquiditySwapConfig, ScriptedAdapter, ScriptedOutcome,
    SimulatedAttestationService, SimulatedChainClient, SimulatedSwapRouter, StaticClientProvider,
};
pub use domain::{
    AdapterError, BridgeDetails, BridgeParams, BridgeResult, BridgeStatus, FeeEstimate,
    HealthPolicy, HealthTracker, ProgressStage, ProtocolHealth, ValidationOutcome,
};
pub use ports::{
    AttestationService, ChainClientProvider, Confirmation, NoopProgress, ProgressReporter,
    ProtocolAdapter, RecordingProgress, SourceChainClient, SwapQuote, SwapRouter, SwapSettlement,
    TracingProgress, TransferKind, TransferRequest,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
