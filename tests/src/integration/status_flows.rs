//! # Status Flows
//!
//! Status queries (xp-06) over intents driven by the purchase engine (xp-04).

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use parking_lot::Mutex;
    use shared_types::{BridgeErrorCode, IntentStatus};
    use std::sync::Arc;
    use std::time::Duration;
    use xp_01_protocol_adapters::{NoopProgress, ScriptedOutcome};
    use xp_06_status_poller::StopReason;

    #[tokio::test]
    async fn test_unknown_id_reports_broadcasting() {
        let stack = stack(&[Arc::new(swap_adapter())], 3);

        let status = stack.status().status("0xnot-indexed-yet").await;
        assert_eq!(status.status, IntentStatus::Broadcasting);
        assert!(status.receipt.is_none());
        assert!(status.error_code.is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_polled_reports_once() {
        let stack = stack(&[Arc::new(swap_adapter())], 3);
        let poller = xp_06_status_poller::StatusPoller::new(
            Arc::new(stack.status()),
            xp_06_status_poller::PollerConfig {
                schedule: xp_06_status_poller::BackoffSchedule::fixed(Duration::from_millis(1)),
                max_polls: Some(5),
            },
        )
        .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let summary = poller
            .spawn("0xnot-indexed-yet", move |s| sink.lock().push(s.status))
            .join()
            .await;

        assert_eq!(summary.reason, StopReason::MaxPolls);
        assert_eq!(summary.polls, 5);
        assert_eq!(*seen.lock(), vec![IntentStatus::Broadcasting]);
    }

    #[tokio::test]
    async fn test_poller_sees_each_status_once() {
        let adapter = Arc::new(
            swap_adapter().then(ScriptedOutcome::Hang(Duration::from_millis(80))),
        );
        let stack = stack(&[adapter], 3);
        let intent = stack.engine.create_intent(eth_request(10)).await.unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = stack
            .poller()
            .spawn(intent.id.clone(), move |s| sink.lock().push(s.status));
        let processing = stack
            .engine
            .spawn_processing(intent.id.clone(), Arc::new(NoopProgress));

        let summary = handle.join().await;
        processing.await.unwrap().unwrap();

        assert_eq!(summary.reason, StopReason::Terminal);
        let seen = seen.lock().clone();
        assert_eq!(seen.last(), Some(&IntentStatus::Executed));
        assert!(seen.contains(&IntentStatus::Bridging));
        assert!(seen.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(seen.len() as u32, summary.changes);
    }

    #[tokio::test]
    async fn test_failed_status_carries_error() {
        let adapter = Arc::new(swap_adapter().then(ScriptedOutcome::FailRaw(
            "insufficient funds for gas".into(),
        )));
        let stack = stack(&[adapter], 3);

        let intent = stack
            .engine
            .submit_intent(eth_request(1), &NoopProgress)
            .await
            .unwrap();
        let status = stack.status().status(&intent.id).await;
        assert_eq!(status.status, IntentStatus::Failed);
        assert_eq!(status.error_code, Some(BridgeErrorCode::InsufficientFunds));
        assert!(status.error.is_some());
        assert!(status.receipt.is_none());
    }

    #[tokio::test]
    async fn test_cancel_leaves_processing_untouched() {
        let adapter = Arc::new(
            swap_adapter().then(ScriptedOutcome::Hang(Duration::from_millis(60))),
        );
        let stack = stack(&[adapter], 3);
        let intent = stack.engine.create_intent(eth_request(3)).await.unwrap();

        let processing = stack
            .engine
            .spawn_processing(intent.id.clone(), Arc::new(NoopProgress));
        let handle = stack.poller().spawn(intent.id.clone(), |_| {});
        tokio::time::sleep(Duration::from_millis(15)).await;
        handle.cancel();
        assert_eq!(handle.join().await.reason, StopReason::Cancelled);

        let done = processing.await.unwrap().unwrap();
        assert_eq!(done.status, IntentStatus::Executed);
    }
}
