//! # Domain Module
//!
//! Core domain types for the protocol adapters.

pub mod errors;
pub mod health;
pub mod value_objects;

pub use errors::*;
pub use health::*;
pub use value_objects::*;
