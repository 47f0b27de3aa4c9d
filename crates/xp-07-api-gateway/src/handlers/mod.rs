//! # HTTP Handlers

pub mod health;
pub mod intents;
pub mod status;
pub mod webhook;

pub use health::{health, reset_health, HealthResponse};
pub use intents::{create_intent, get_intent, list_intents};
pub use status::get_status;
pub use webhook::receive_webhook;
