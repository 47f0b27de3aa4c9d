//! # Purchase Flows
//!
//! Purchase engine (xp-04) driving the bridge manager (xp-02) over scripted
//! adapters (xp-01), persisting through the intent store (xp-03).
//!
//! ## Scenarios
//!
//! 1. Healthy route executes end to end
//! 2. Repeated NETWORK_ERROR trips the circuit breaker after three calls
//! 3. The breaker wins over a retryable classification
//! 4. A fallback-eligible failure moves to the next protocol
//! 5. A crashed run is resumed from the store

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use shared_types::{BridgeErrorCode, IntentStatus, ProtocolKind};
    use std::sync::Arc;
    use xp_01_protocol_adapters::{NoopProgress, RecordingProgress, ScriptedAdapter, ScriptedOutcome};

    fn network_error() -> ScriptedOutcome {
        ScriptedOutcome::Fail(BridgeErrorCode::NetworkError, "connection reset by peer".into())
    }

    #[tokio::test]
    async fn test_healthy_ten_unit_purchase() {
        let adapter = Arc::new(swap_adapter());
        let stack = stack(&[adapter.clone()], 3);
        let progress = RecordingProgress::new();

        let intent = stack
            .engine
            .submit_intent(eth_request(10), &progress)
            .await
            .unwrap();

        assert_eq!(intent.status, IntentStatus::Executed);
        assert_eq!(intent.units, Some(10));
        assert_eq!(intent.protocol, Some(ProtocolKind::LiquiditySwap));
        assert!(intent.source_tx_hash.is_some());
        assert!(intent.purchase_tx_hash.is_some());
        assert!(intent.error_code.is_none());
        assert_eq!(adapter.bridge_calls(), 1);
        assert_eq!(stack.purchaser.calls(), 1);

        let status = stack.status().status(&intent.id).await;
        assert_eq!(status.status, IntentStatus::Executed);
        let receipt = status.receipt.unwrap();
        assert_eq!(receipt.units, Some(10));
        assert_eq!(Some(receipt.purchase_tx_hash), intent.purchase_tx_hash);
    }

    #[tokio::test]
    async fn test_network_errors_trip_breaker_after_three_calls() {
        let adapter = Arc::new(swap_adapter().always(network_error()));
        let stack = stack(&[adapter.clone()], 3);

        let intent = stack
            .engine
            .submit_intent(eth_request(10), &NoopProgress)
            .await
            .unwrap();

        assert_eq!(intent.status, IntentStatus::Failed);
        assert_eq!(intent.error_code, Some(BridgeErrorCode::TooManyFailures));
        assert_eq!(adapter.bridge_calls(), 3);
        assert_eq!(intent.failure_count, 3);
        assert_eq!(stack.purchaser.calls(), 0);
    }

    #[tokio::test]
    async fn test_breaker_wins_over_retryable_code() {
        let adapter = Arc::new(swap_adapter());
        let stack = stack(&[adapter.clone()], 3);
        let created = stack.engine.create_intent(eth_request(10)).await.unwrap();

        // three retryable failures already on record from a previous run
        stack
            .intents
            .mutate(&created.id, |intent, now| {
                intent.transition_to(IntentStatus::Bridging, now)?;
                for _ in 0..3 {
                    intent.record_failure(BridgeErrorCode::NetworkError, "timeout", now);
                }
                Ok(())
            })
            .await
            .unwrap();

        let intent = stack
            .engine
            .process_intent(&created.id, &NoopProgress)
            .await
            .unwrap();
        assert_eq!(intent.status, IntentStatus::Failed);
        assert_eq!(intent.error_code, Some(BridgeErrorCode::TooManyFailures));
        assert_eq!(adapter.bridge_calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_to_next_protocol() {
        let attestation = Arc::new(
            ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE]).then(
                ScriptedOutcome::FailRaw("attestation request timed out".into()),
            ),
        );
        let swap = Arc::new(swap_adapter());
        let stack = stack(&[attestation.clone(), swap.clone()], 3);

        let intent = stack
            .engine
            .submit_intent(eth_request(4), &NoopProgress)
            .await
            .unwrap();

        assert_eq!(intent.status, IntentStatus::Executed);
        // first commitment is never overwritten
        assert_eq!(intent.protocol, Some(ProtocolKind::Attestation));
        assert_eq!(intent.active_protocol(), Some(ProtocolKind::LiquiditySwap));
        assert_eq!(intent.error_history.len(), 1);
        assert_eq!(
            intent.error_history[0].code,
            BridgeErrorCode::AttestationTimeout
        );
        assert_eq!(attestation.bridge_calls(), 1);
        assert_eq!(swap.bridge_calls(), 1);
    }

    #[tokio::test]
    async fn test_user_rejection_is_final() {
        let swap = Arc::new(
            swap_adapter().then(ScriptedOutcome::FailRaw("User rejected the request".into())),
        );
        let attestation = Arc::new(ScriptedAdapter::new(ProtocolKind::Attestation, [ETH_BASE]));
        let stack = stack(&[swap.clone(), attestation.clone()], 3);

        let intent = stack
            .engine
            .submit_intent(eth_request(1), &NoopProgress)
            .await
            .unwrap();
        assert_eq!(intent.status, IntentStatus::Failed);
        assert_eq!(intent.error_code, Some(BridgeErrorCode::WalletRejected));
        assert_eq!(attestation.bridge_calls(), 0);
    }

    #[tokio::test]
    async fn test_resume_after_crash() {
        let adapter = Arc::new(swap_adapter());
        let stack = stack(&[adapter.clone()], 3);
        let created = stack.engine.create_intent(eth_request(2)).await.unwrap();
        stack
            .intents
            .mutate(&created.id, |intent, now| {
                intent.transition_to(IntentStatus::Bridging, now)?;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(stack.engine.resume_in_flight(Arc::new(NoopProgress)).await, 1);

        let summary = stack.poller().spawn(created.id.clone(), |_| {}).join().await;
        let last = summary.last.unwrap();
        assert_eq!(last.status, IntentStatus::Executed);
        assert_eq!(adapter.bridge_calls(), 1);
    }
}
