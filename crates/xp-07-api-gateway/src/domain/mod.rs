//! # Domain Module

pub mod config;
pub mod error;

pub use config::GatewayConfig;
pub use error::GatewayError;
