//! # Cross-Purchase Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Shared builders and payloads
//! ├── properties.rs      # Property tests over the pure algorithms
//! └── integration/       # Cross-subsystem scenarios
//!     ├── purchase_flows.rs   # engine + bridge manager + store
//!     ├── webhook_flows.rs    # ingestion → engine
//!     ├── status_flows.rs     # engine → status → poller
//!     └── node_flows.rs       # fully wired node over HTTP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p xp-tests
//!
//! # By category
//! cargo test -p xp-tests integration::
//! cargo test -p xp-tests properties::
//! ```

#![allow(dead_code)]

#[cfg(test)]
pub mod fixtures;
pub mod integration;
pub mod properties;
