//! # Domain Module
//!
//! Store errors. The `Intent` entity itself lives in `shared-types`.

pub mod errors;

pub use errors::*;
