//! # Property Tests
//!
//! Invariants of the pure decision functions, checked over generated inputs.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::{parse_amount, BridgeErrorCode};
    use std::time::Duration;
    use xp_02_bridge_manager::{classify_error, should_trigger_fallback};
    use xp_05_event_ingestion::algorithms::scalar_text;
    use xp_05_event_ingestion::constant_time_compare;
    use xp_06_status_poller::BackoffSchedule;

    fn any_code() -> impl Strategy<Value = BridgeErrorCode> {
        prop_oneof![
            Just(BridgeErrorCode::AttestationTimeout),
            Just(BridgeErrorCode::TransactionTimeout),
            Just(BridgeErrorCode::NonceError),
            Just(BridgeErrorCode::NetworkError),
            Just(BridgeErrorCode::InsufficientFunds),
            Just(BridgeErrorCode::WalletRejected),
            Just(BridgeErrorCode::InvalidAddress),
            Just(BridgeErrorCode::InvalidAmount),
            Just(BridgeErrorCode::NoRoute),
            Just(BridgeErrorCode::TooManyFailures),
        ]
    }

    proptest! {
        #[test]
        fn reported_code_always_wins(code in any_code(), message in ".{0,64}") {
            prop_assert_eq!(classify_error(Some(code), &message), code);
        }

        #[test]
        fn fallback_matches_retryability(code in any_code()) {
            prop_assert_eq!(should_trigger_fallback(code), code.is_retryable());
        }

        #[test]
        fn classification_of_raw_messages_never_trips_breaker(message in ".{0,64}") {
            let code = classify_error(None, &message);
            prop_assert_ne!(code, BridgeErrorCode::TooManyFailures);
            prop_assert_ne!(code, BridgeErrorCode::NoRoute);
        }

        #[test]
        fn positive_amounts_parse(whole in 1u64..1_000_000_000, frac in 0u32..1_000_000) {
            let raw = format!("{}.{:06}", whole, frac);
            prop_assert!(parse_amount(&raw).is_ok());
            let negative = format!("-{}", raw);
            prop_assert!(parse_amount(&negative).is_err());
        }

        #[test]
        fn backoff_never_shrinks(poll in 1u32..500) {
            let schedule = BackoffSchedule::default();
            let now = schedule.interval(poll);
            prop_assert!(now <= schedule.interval(poll + 1));
            prop_assert!(now <= schedule.cap);
            prop_assert!(now >= Duration::from_secs(3));
        }

        #[test]
        fn clarity_uints_decode(n in any::<u64>()) {
            let literal = serde_json::Value::String(format!("u{}", n));
            let expected = n.to_string();
            let decoded = scalar_text(&literal);
            prop_assert_eq!(decoded.as_deref(), Some(expected.as_str()));
        }

        #[test]
        fn secret_comparison(a in "[a-zA-Z0-9]{1,40}", b in "[a-zA-Z0-9]{1,40}") {
            prop_assert!(constant_time_compare(&a, &a));
            prop_assert_eq!(constant_time_compare(&a, &b), a == b);
        }
    }
}
