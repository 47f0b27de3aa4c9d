//! # XP-07 API Gateway
//!
//! HTTP surface of the orchestrator.
//!
//! **Subsystem ID:** 07
//! **Architecture:** axum router over the engine, status and ingestion services
//!
//! ## Routes
//!
//! | Method | Path | Auth | Success |
//! |--------|------|------|---------|
//! | POST | `/webhook` | webhook bearer | 200 `{"status":"received"}` |
//! | GET | `/status/:id` | - | 200 `StatusResponse` |
//! | POST | `/intents` | - | 202 `Intent` |
//! | GET | `/intents/:id` | - | 200 `Intent` |
//! | GET | `/intents?address=` | - | 200 `[Intent]` |
//! | GET | `/health` | - | 200 `{status, protocols}` |
//! | POST | `/admin/health/reset` | admin bearer | 200 |
//!
//! ## Module Structure
//!
//! ```text
//! xp-07-api-gateway/
//! ├── domain/          # GatewayConfig, GatewayError
//! ├── handlers/        # One module per route group
//! ├── middleware/      # Admin bearer check
//! ├── router.rs        # AppState, build_router
//! └── service.rs       # GatewayService (bind, serve, graceful shutdown)
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports
pub use domain::{GatewayConfig, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
