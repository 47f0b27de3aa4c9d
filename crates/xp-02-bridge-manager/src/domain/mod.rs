//! # Domain Module
//!
//! Configuration, errors and execution outcomes of the bridge manager.

pub mod config;
pub mod errors;
pub mod execution;

pub use config::*;
pub use errors::*;
pub use execution::*;
