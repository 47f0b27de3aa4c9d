//! # Outbound Ports
//!
//! Extracted requests are handed to the purchase engine's inbound port.

pub use xp_04_purchase_engine::IntentProcessor;
