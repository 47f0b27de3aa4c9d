//! # Integration Scenarios
//!
//! Cross-subsystem flows, each wired from real services with scripted or
//! simulated chain access.

pub mod node_flows;
pub mod purchase_flows;
pub mod status_flows;
pub mod webhook_flows;
