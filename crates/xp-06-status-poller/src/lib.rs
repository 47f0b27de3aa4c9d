//! # XP-06 Status Poller
//!
//! Status queries for callers and a change-only poller for watchers.
//!
//! **Subsystem ID:** 06
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Backoff
//!
//! | Polls | Interval |
//! |-------|----------|
//! | 1-10 | 3 s |
//! | 11-30 | 5 s |
//! | 31-60 | 10 s |
//! | 61+ | 15 s |
//!
//! ## Module Structure
//!
//! ```text
//! xp-06-status-poller/
//! ├── domain/          # StatusResponse, BackoffSchedule, PollerConfig, errors
//! ├── ports/           # StatusSource
//! ├── adapters/        # ScriptedStatusSource
//! ├── service.rs       # StatusService (local store)
//! └── poller.rs        # StatusPoller, PollerHandle
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod poller;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::ScriptedStatusSource;
pub use domain::{BackoffSchedule, PollerConfig, PollerError, PurchaseReceipt, StatusResponse};
pub use poller::{PollSummary, PollerHandle, StatusPoller, StopReason};
pub use ports::StatusSource;
pub use service::StatusService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
