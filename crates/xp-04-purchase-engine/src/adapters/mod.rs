//! # Adapters Module

pub mod simulated;

pub use simulated::{SimulatedMintClaimer, SimulatedPurchaseExecutor};
