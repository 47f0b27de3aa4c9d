//! # XP-02 Bridge Manager
//!
//! Chooses which protocol adapter moves an intent's funds, and decides what a
//! failure means.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Responsibilities
//!
//! - Registry of adapters, injected at startup
//! - Selection: capable adapters only, healthy before unhealthy, then by
//!   preference list, then by registration order
//! - `validate` before any commitment, then `bridge`: record health, classify.
//!   A call past `bridge_timeout` is flagged overdue but never abandoned
//! - Error classification and the fallback lookup table
//!
//! ## Fallback Table
//!
//! | Code | Fallback |
//! |------|----------|
//! | `ATTESTATION_TIMEOUT` | yes |
//! | `TRANSACTION_TIMEOUT` | yes |
//! | `NONCE_ERROR` | yes |
//! | `NETWORK_ERROR` | yes |
//! | anything else | no |

#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod service;

// Re-exports
pub use algorithms::{classify_error, rank_candidates, should_trigger_fallback, Candidate};
pub use domain::{BridgeExecution, BridgeManagerConfig, ManagerError};
pub use service::BridgeManager;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
