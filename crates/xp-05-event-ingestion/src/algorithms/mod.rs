//! # Algorithms Module
//!
//! Tolerant decoding of print events and request extraction.

pub mod extract;
pub mod fields;

pub use extract::{extract_request, find_purchase_data, parse_purchase, PurchaseEvent};
pub use fields::{decode_value, event_data, event_value, has_marker, resolve_field, scalar_text};
