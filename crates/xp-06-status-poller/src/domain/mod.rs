//! # Domain Module
//!
//! Status view, backoff schedule, configuration and errors.

pub mod backoff;
pub mod config;
pub mod errors;
pub mod status;

pub use backoff::BackoffSchedule;
pub use config::PollerConfig;
pub use errors::PollerError;
pub use status::{PurchaseReceipt, StatusResponse};
