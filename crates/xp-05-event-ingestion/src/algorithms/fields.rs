//! # Tolerant Field Resolution
//!
//! Print events arrive in several shapes depending on the contract version
//! and the indexer: plain objects, JSON-encoded strings, Clarity literals
//! (`u100`, `"text"`), and `{"value": ...}` wrappers. Each field is resolved
//! by trying an ordered list of keys.

use serde_json::{Map, Value};

/// Event `type` values that can carry a print payload.
pub const EVENT_TYPES: &[&str] = &["SmartContractEvent", "print_event", "contract_log"];

/// Keys that may hold the marker.
pub const MARKER_KEYS: &[&str] = &["event", "topic", "type", "action"];

/// Keys that may hold the data map.
pub const DATA_KEYS: &[&str] = &["data", "payload"];

pub const DESTINATION_KEYS: &[&str] = &[
    "base-address",
    "baseAddress",
    "destination",
    "destination-address",
    "recipient",
];

pub const UNIT_KEYS: &[&str] = &["units", "unit-count", "unitCount", "shares", "quantity"];

pub const AMOUNT_KEYS: &[&str] = &[
    "amount",
    "source-amount",
    "sourceAmount",
    "stx-amount",
    "sbtc-amount",
    "usdc-amount",
];

pub const TOKEN_KEYS: &[&str] = &["token", "token-id", "tokenId", "asset"];

/// Parse a JSON-encoded string into an object; anything else is returned as is.
pub fn decode_value(value: &Value) -> Value {
    if let Value::String(raw) = value {
        if let Ok(parsed @ Value::Object(_)) = serde_json::from_str::<Value>(raw.trim()) {
            return parsed;
        }
    }
    value.clone()
}

/// Strip `{"value": ...}` wrappers.
pub fn unwrap_value(mut value: &Value) -> &Value {
    while let Some(inner) = value.as_object().and_then(|map| map.get("value")) {
        value = inner;
    }
    value
}

/// Scalar as text: strings (Clarity quotes and `u` prefix stripped) and numbers.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match unwrap_value(value) {
        Value::String(s) => clarity_literal(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn clarity_literal(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    let unquoted = unquoted.strip_prefix('\'').unwrap_or(unquoted);

    match unquoted.strip_prefix('u') {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.to_string()
        }
        _ => unquoted.to_string(),
    }
}

/// First key in `keys` with a usable scalar value.
pub fn resolve_field(data: &Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, String)> {
    keys.iter()
        .find_map(|key| data.get(*key).and_then(scalar_text).map(|text| (*key, text)))
}

/// Print value of an event whose type can carry one.
pub fn event_value(event: &Value) -> Option<Value> {
    let kind = event.get("type").and_then(Value::as_str)?;
    if !EVENT_TYPES.iter().any(|t| t.eq_ignore_ascii_case(kind)) {
        return None;
    }
    let raw = event
        .pointer("/data/value")
        .or_else(|| event.get("value"))
        .or_else(|| event.get("data"))?;
    Some(decode_value(raw))
}

/// Whether a decoded print value carries `marker`.
pub fn has_marker(value: &Value, marker: &str) -> bool {
    match value {
        Value::String(_) => scalar_text(value).as_deref() == Some(marker),
        Value::Object(map) => MARKER_KEYS.iter().any(|key| {
            map.get(*key)
                .and_then(scalar_text)
                .is_some_and(|text| text == marker)
        }),
        _ => false,
    }
}

/// Data map of a decoded print value: `data`, `payload`, or the value itself.
pub fn event_data(value: &Value) -> Option<Map<String, Value>> {
    let map = value.as_object()?;
    for key in DATA_KEYS {
        if let Some(Value::Object(inner)) = map.get(*key).map(decode_value) {
            return Some(inner);
        }
    }
    Some(map.clone())
}
