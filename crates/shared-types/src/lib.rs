//! # Shared Types Crate
//!
//! This crate contains the domain entities shared by every subsystem of the
//! cross-purchase orchestrator.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chains, amounts, the `Intent` record and the
//!   bridge error taxonomy are defined here and nowhere else.
//! - **Append-only history**: transaction hashes are set once, errors and
//!   bridge attempts are appended, `failure_count` only grows.
//! - **Monotonic writes**: every mutation bumps `updated_at` strictly forward
//!   so stores can reject stale writes.

pub mod amount;
pub mod chain;
pub mod entities;
pub mod errors;
pub mod time;

pub use amount::{parse_amount, Amount};
pub use chain::ChainId;
pub use entities::*;
pub use errors::*;
pub use time::now_millis;
