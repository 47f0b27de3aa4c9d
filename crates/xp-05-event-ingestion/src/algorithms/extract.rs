//! Purchase event extraction from one transaction.

use serde_json::{Map, Value};
use shared_types::IntentRequest;

use super::fields::{
    event_data, event_value, has_marker, resolve_field, AMOUNT_KEYS, DESTINATION_KEYS,
    TOKEN_KEYS, UNIT_KEYS,
};
use crate::domain::{ExtractError, IngestConfig, TransactionEvent};

/// Fields of a purchase print event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseEvent {
    pub destination_address: String,
    pub amount: String,
    pub token: String,
    pub units: Option<u64>,
}

/// Data map of the first event in `events` carrying `marker`.
pub fn find_purchase_data(events: &[Value], marker: &str) -> Option<Map<String, Value>> {
    events
        .iter()
        .filter_map(event_value)
        .find(|value| has_marker(value, marker))
        .map(|value| event_data(&value).unwrap_or_default())
}

/// Resolve purchase fields from a data map.
///
/// A token named by an amount key (`stx-amount`, ...) is used when no
/// explicit token field is present.
pub fn parse_purchase(
    data: &Map<String, Value>,
    default_token: &str,
) -> Result<PurchaseEvent, ExtractError> {
    let (_, destination_address) = resolve_field(data, DESTINATION_KEYS)
        .ok_or(ExtractError::MissingField("destination address"))?;
    let (amount_key, amount) =
        resolve_field(data, AMOUNT_KEYS).ok_or(ExtractError::MissingField("amount"))?;

    let token = match resolve_field(data, TOKEN_KEYS) {
        Some((_, token)) => token,
        None => amount_key
            .strip_suffix("-amount")
            .filter(|prefix| *prefix != "source")
            .unwrap_or(default_token)
            .to_string(),
    };

    let units = match resolve_field(data, UNIT_KEYS) {
        Some((_, raw)) => Some(raw.parse::<u64>().map_err(|_| ExtractError::InvalidField {
            field: "units",
            value: raw,
        })?),
        None => None,
    };

    Ok(PurchaseEvent {
        destination_address,
        amount,
        token: token.to_ascii_lowercase(),
        units,
    })
}

/// Build an intent request for a transaction, or `None` if it carries no
/// purchase event.
pub fn extract_request(
    tx: &TransactionEvent,
    config: &IngestConfig,
) -> Result<Option<IntentRequest>, ExtractError> {
    let Some(data) = find_purchase_data(&tx.metadata.receipt.events, &config.marker) else {
        return Ok(None);
    };

    if tx.hash().trim().is_empty() {
        return Err(ExtractError::MissingField("transaction hash"));
    }
    let sender = tx
        .metadata
        .sender
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ExtractError::MissingField("sender"))?;
    let event = parse_purchase(&data, &config.default_token)?;

    Ok(Some(IntentRequest {
        id: Some(tx.hash().trim().to_string()),
        source_chain: config.source_chain,
        destination_chain: config.destination_chain,
        amount: event.amount,
        source_address: sender.to_string(),
        destination_address: event.destination_address,
        token: event.token,
        units: event.units,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::ChainId;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn tx(events: Value) -> TransactionEvent {
        serde_json::from_value(json!({
            "transaction_identifier": {"hash": "0xabc123"},
            "metadata": {
                "sender": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "success": true,
                "receipt": {"events": events}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_clarity_shaped_event() {
        let event = parse_purchase(
            &map(json!({
                "base-address": "\"0x2222222222222222222222222222222222222222\"",
                "unit-count": "u10",
                "stx-amount": "u250",
            })),
            "stx",
        )
        .unwrap();
        assert_eq!(event.destination_address, "0x2222222222222222222222222222222222222222");
        assert_eq!(event.units, Some(10));
        assert_eq!(event.amount, "250");
        assert_eq!(event.token, "stx");
    }

    #[test]
    fn test_token_from_amount_key_and_explicit() {
        let inferred = parse_purchase(
            &map(json!({"recipient": "0xaa", "usdc-amount": 5})),
            "stx",
        )
        .unwrap();
        assert_eq!(inferred.token, "usdc");

        let explicit = parse_purchase(
            &map(json!({"recipient": "0xaa", "sbtc-amount": 5, "asset": "USDC"})),
            "stx",
        )
        .unwrap();
        assert_eq!(explicit.token, "usdc");

        let fallback = parse_purchase(
            &map(json!({"recipient": "0xaa", "source-amount": 5})),
            "stx",
        )
        .unwrap();
        assert_eq!(fallback.token, "stx");
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert_eq!(
            parse_purchase(&map(json!({"amount": 1})), "stx").unwrap_err(),
            ExtractError::MissingField("destination address")
        );
        assert_eq!(
            parse_purchase(&map(json!({"recipient": "0xaa"})), "stx").unwrap_err(),
            ExtractError::MissingField("amount")
        );
        assert!(matches!(
            parse_purchase(
                &map(json!({"recipient": "0xaa", "amount": 1, "units": "many"})),
                "stx"
            ),
            Err(ExtractError::InvalidField { field: "units", .. })
        ));
    }

    #[test]
    fn test_extract_request() {
        let tx = tx(json!([
            {"type": "STXTransferEvent", "data": {"amount": "1"}},
            {"type": "SmartContractEvent", "data": {"value": {
                "event": "bridge-purchase-initiated",
                "data": {"baseAddress": "0x2222222222222222222222222222222222222222", "amount": "u3", "units": "u3"}
            }}}
        ]));
        let request = extract_request(&tx, &IngestConfig::default()).unwrap().unwrap();
        assert_eq!(request.id.as_deref(), Some("0xabc123"));
        assert_eq!(request.source_chain, ChainId::Stacks);
        assert_eq!(request.destination_chain, ChainId::Base);
        assert_eq!(request.source_address, "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        assert_eq!(request.amount, "3");
        assert_eq!(request.units, Some(3));
        assert_eq!(request.token, "stx");
    }

    #[test]
    fn test_no_marker_is_not_an_error() {
        let tx = tx(json!([
            {"type": "print_event", "value": {"event": "other-thing", "amount": 1}}
        ]));
        assert_eq!(extract_request(&tx, &IngestConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_missing_sender() {
        let mut tx = tx(json!([
            {"type": "contract_log", "value": {"topic": "bridge-purchase-initiated", "recipient": "0xaa", "amount": 1}}
        ]));
        tx.metadata.sender = None;
        assert_eq!(
            extract_request(&tx, &IngestConfig::default()).unwrap_err(),
            ExtractError::MissingField("sender")
        );
    }
}
