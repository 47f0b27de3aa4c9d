//! # Domain Module
//!
//! Engine configuration and errors.

pub mod config;
pub mod errors;
pub mod id;

pub use config::*;
pub use errors::*;
pub use id::generate_intent_id;
