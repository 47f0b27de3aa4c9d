//! # XP-03 Intent Store
//!
//! Keyed, concurrency-safe storage of purchase intents plus the state
//! machine service every writer goes through.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Concurrency Model
//!
//! | Concern | Mechanism |
//! |---------|-----------|
//! | Storage | `DashMap` (sharded, no global lock) |
//! | Lost updates | compare-and-swap on `version`, `updatedAt` must advance |
//! | One driver per intent | `KeyedLocks` (`try_lock_owned`) |
//! | Terminal intents | writes rejected |
//!
//! ## Module Structure
//!
//! ```text
//! xp-03-intent-store/
//! ├── domain/          # StoreError
//! ├── ports/           # IntentRepository
//! ├── adapters/        # InMemoryIntentStore
//! ├── locks.rs         # KeyedLocks
//! └── service.rs       # IntentService
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod locks;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryIntentStore;
pub use domain::StoreError;
pub use locks::KeyedLocks;
pub use ports::IntentRepository;
pub use service::{IntentService, DEFAULT_WRITE_RETRIES};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
