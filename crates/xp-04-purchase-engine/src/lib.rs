//! # XP-04 Purchase Engine
//!
//! Orchestrates a purchase intent end to end: bridge the funds, claim the
//! mint when the protocol needs one, then execute the purchase on Base.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lifecycle
//!
//! ```text
//! pending ─► [signing ─► broadcasting] ─► bridging ─┬─► awaiting_mint ─► purchasing ─► executed
//!                                                   └─► purchasing
//! any non-terminal ─► failed
//! ```
//!
//! ## Failure Policy
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | `failure_count >= max_failures` before a step | `TOO_MANY_FAILURES`, step not run |
//! | `failure_count > max_failures` after a failure | `TOO_MANY_FAILURES` |
//! | non-retryable code | fail with that code |
//! | retryable code | wait `retry_delay`, next candidate adapter |
//!
//! ## Module Structure
//!
//! ```text
//! xp-04-purchase-engine/
//! ├── domain/          # EngineConfig, EngineError, StepError, intent ids
//! ├── ports/           # IntentProcessor (in), MintClaimer / PurchaseExecutor (out)
//! ├── adapters/        # Simulated destination-chain steps
//! └── service.rs       # PurchaseEngine
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{SimulatedMintClaimer, SimulatedPurchaseExecutor};
pub use domain::{
    generate_intent_id, EngineConfig, EngineError, StepError, DEFAULT_MAX_FAILURES,
};
pub use ports::{IntentProcessor, MintClaimer, PurchaseExecutor};
pub use service::PurchaseEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
