//! # Subsystem Container
//!
//! Configuration loading and dependency injection for every subsystem.

pub mod clients;
pub mod config;
pub mod subsystems;

pub use clients::LazyClientProvider;
pub use config::{ConfigError, LoggingConfig, NodeConfig};
pub use subsystems::SubsystemContainer;
