//! # Error Classification
//!
//! Bridge failures are classified exactly once, here. Downstream decisions
//! (retry, fallback, give up) look only at the resulting code.

use shared_types::BridgeErrorCode;

/// Classify a failure. An adapter-reported code always wins; otherwise the
/// raw message is mapped by keyword.
pub fn classify_error(reported: Option<BridgeErrorCode>, message: &str) -> BridgeErrorCode {
    if let Some(code) = reported {
        return code;
    }

    let msg = message.to_ascii_lowercase();
    let timed_out = msg.contains("timeout") || msg.contains("timed out");

    if msg.contains("attestation") && timed_out {
        BridgeErrorCode::AttestationTimeout
    } else if timed_out {
        BridgeErrorCode::TransactionTimeout
    } else if msg.contains("nonce") {
        BridgeErrorCode::NonceError
    } else if msg.contains("insufficient") {
        BridgeErrorCode::InsufficientFunds
    } else if is_user_rejection(&msg) {
        BridgeErrorCode::WalletRejected
    } else if msg.contains("invalid address") {
        BridgeErrorCode::InvalidAddress
    } else {
        BridgeErrorCode::NetworkError
    }
}

fn is_user_rejection(msg: &str) -> bool {
    let refused = ["rejected", "denied", "cancelled", "canceled"]
        .iter()
        .any(|word| msg.contains(word));
    refused && msg.contains("user")
}

/// Whether a failure with `code` may be retried on another (or the same)
/// protocol. Pure lookup.
pub fn should_trigger_fallback(code: BridgeErrorCode) -> bool {
    matches!(
        code,
        BridgeErrorCode::AttestationTimeout
            | BridgeErrorCode::TransactionTimeout
            | BridgeErrorCode::NonceError
            | BridgeErrorCode::NetworkError
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_code_wins() {
        assert_eq!(
            classify_error(Some(BridgeErrorCode::WalletRejected), "network timeout"),
            BridgeErrorCode::WalletRejected
        );
    }

    #[test]
    fn test_keyword_mapping() {
        let cases = [
            ("Attestation polling timed out", BridgeErrorCode::AttestationTimeout),
            ("attestation timeout after 20m", BridgeErrorCode::AttestationTimeout),
            ("RPC request timeout", BridgeErrorCode::TransactionTimeout),
            ("nonce too low", BridgeErrorCode::NonceError),
            ("insufficient funds for gas", BridgeErrorCode::InsufficientFunds),
            ("User rejected the request", BridgeErrorCode::WalletRejected),
            ("transaction cancelled by user", BridgeErrorCode::WalletRejected),
            ("Invalid address: 0x12", BridgeErrorCode::InvalidAddress),
            ("connection reset by peer", BridgeErrorCode::NetworkError),
            ("", BridgeErrorCode::NetworkError),
        ];
        for (message, expected) in cases {
            assert_eq!(classify_error(None, message), expected, "{}", message);
        }
    }

    #[test]
    fn test_rejection_without_user_is_network() {
        assert_eq!(
            classify_error(None, "request rejected by upstream"),
            BridgeErrorCode::NetworkError
        );
    }

    #[test]
    fn test_fallback_truth_table() {
        let retryable = [
            BridgeErrorCode::AttestationTimeout,
            BridgeErrorCode::TransactionTimeout,
            BridgeErrorCode::NonceError,
            BridgeErrorCode::NetworkError,
        ];
        let terminal = [
            BridgeErrorCode::InsufficientFunds,
            BridgeErrorCode::WalletRejected,
            BridgeErrorCode::InvalidAddress,
            BridgeErrorCode::InvalidAmount,
            BridgeErrorCode::NoRoute,
            BridgeErrorCode::TooManyFailures,
        ];
        for code in retryable {
            assert!(should_trigger_fallback(code), "{}", code);
            assert!(code.is_retryable());
        }
        for code in terminal {
            assert!(!should_trigger_fallback(code), "{}", code);
            assert!(!code.is_retryable());
        }
    }
}
