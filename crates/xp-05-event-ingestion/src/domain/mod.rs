//! # Domain Module
//!
//! Payload model, batch report, configuration and errors.

pub mod config;
pub mod errors;
pub mod payload;
pub mod report;

pub use config::*;
pub use errors::*;
pub use payload::*;
pub use report::*;
