//! # XP-05 Event Ingestion
//!
//! Authenticated webhook intake for on-chain purchase events. A Stacks
//! contract prints `bridge-purchase-initiated`; the indexer posts the block to
//! us; each matching transaction becomes an intent request.
//!
//! **Subsystem ID:** 05
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Request Handling
//!
//! | Step | Failure |
//! |------|---------|
//! | Bearer check (constant time) | `Unauthorized`, body never parsed |
//! | Parse batch | `MalformedPayload` |
//! | Per transaction: extract, submit | counted in `BatchReport` |
//! | Rollbacks | logged, ignored |
//!
//! ## Module Structure
//!
//! ```text
//! xp-05-event-ingestion/
//! ├── domain/          # Payload model, BatchReport, IngestConfig, errors
//! ├── algorithms/      # Field resolution, request extraction
//! ├── ports/           # WebhookIngestor (in), IntentProcessor (out)
//! ├── auth.rs          # Bearer verification
//! └── service.rs       # IngestionService
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod auth;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{extract_request, PurchaseEvent};
pub use auth::{bearer_token, constant_time_compare, verify_bearer};
pub use domain::{
    BatchReport, ChainhookPayload, ExtractError, IngestConfig, IngestError, PURCHASE_MARKER,
};
pub use ports::WebhookIngestor;
pub use service::IngestionService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
