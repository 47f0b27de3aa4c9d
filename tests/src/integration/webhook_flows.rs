//! # Webhook Flows
//!
//! Chainhook payloads through event ingestion (xp-05) into the purchase
//! engine (xp-04).

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use serde_json::json;
    use shared_types::{ChainId, IntentStatus, ProtocolKind};
    use std::sync::Arc;
    use xp_01_protocol_adapters::ScriptedAdapter;
    use xp_05_event_ingestion::{IngestConfig, IngestError, IngestionService, WebhookIngestor};

    fn contract_adapter() -> Arc<ScriptedAdapter> {
        Arc::new(ScriptedAdapter::new(ProtocolKind::ContractEvent, [STACKS_BASE]))
    }

    fn ingestor(stack: &Stack) -> IngestionService {
        IngestionService::new(
            IngestConfig::with_secret(WEBHOOK_SECRET),
            Arc::new(stack.engine.clone()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_mixed_batch_isolates_bad_transactions() {
        let adapter = contract_adapter();
        let stack = stack(&[adapter.clone()], 3);
        let ingestor = ingestor(&stack);

        let body = chainhook(vec![
            purchase_tx(
                "0xaa01",
                json!({"base-address": BASE_ADDRESS, "stx-amount": "u500", "units": "u10"}),
            ),
            // no destination
            purchase_tx("0xaa02", json!({"stx-amount": "u500"})),
            // zero amount fails request validation
            purchase_tx("0xaa03", json!({"recipient": BASE_ADDRESS, "amount": "u0"})),
            json!({
                "transaction_identifier": {"hash": "0xaa04"},
                "metadata": {"sender": STACKS_SENDER, "success": false, "receipt": {"events": []}}
            }),
            json!({
                "transaction_identifier": {"hash": "0xaa05"},
                "metadata": {"sender": STACKS_SENDER, "success": true, "receipt": {"events": [
                    {"type": "SmartContractEvent", "data": {"value": {"event": "unrelated"}}}
                ]}}
            }),
        ]);

        let report = ingestor
            .ingest(Some(&bearer(WEBHOOK_SECRET)), &body)
            .await
            .unwrap();
        assert_eq!(report.transactions, 5);
        assert_eq!(report.failed_transactions, 1);
        assert_eq!(report.matched, 3);
        assert_eq!(report.submitted, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.errors, 0);

        let summary = stack.poller().spawn("0xaa01", |_| {}).join().await;
        assert_eq!(summary.last.unwrap().status, IntentStatus::Executed);

        let intent = stack.engine.get_intent("0xaa01").await.unwrap();
        assert_eq!(intent.source_chain, ChainId::Stacks);
        assert_eq!(intent.source_address, STACKS_SENDER);
        assert_eq!(intent.amount, "500");
        assert_eq!(intent.token, "stx");
        assert_eq!(intent.units, Some(10));
        assert!(stack.engine.get_intent("0xaa03").await.is_err());
    }

    #[tokio::test]
    async fn test_redelivered_webhook_is_idempotent() {
        let adapter = contract_adapter();
        let stack = stack(&[adapter.clone()], 3);
        let ingestor = ingestor(&stack);
        let body = chainhook(vec![purchase_tx(
            "0xbb01",
            json!({"recipient": BASE_ADDRESS, "amount": "u25"}),
        )]);
        let auth = bearer(WEBHOOK_SECRET);

        let first = ingestor.ingest(Some(&auth), &body).await.unwrap();
        assert_eq!(first.submitted, 1);
        stack.poller().spawn("0xbb01", |_| {}).join().await;

        let second = ingestor.ingest(Some(&auth), &body).await.unwrap();
        assert_eq!(second.submitted, 1);
        stack.poller().spawn("0xbb01", |_| {}).join().await;

        assert_eq!(adapter.bridge_calls(), 1);
        assert_eq!(stack.purchaser.calls(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_batch_creates_nothing() {
        let adapter = contract_adapter();
        let stack = stack(&[adapter.clone()], 3);
        let ingestor = ingestor(&stack);
        let body = chainhook(vec![purchase_tx(
            "0xcc01",
            json!({"recipient": BASE_ADDRESS, "amount": "u1"}),
        )]);

        for header in [None, Some("Bearer wrong-secret"), Some(WEBHOOK_SECRET)] {
            assert_eq!(
                ingestor.ingest(header, &body).await.unwrap_err(),
                IngestError::Unauthorized
            );
        }
        assert!(stack.engine.get_intent("0xcc01").await.is_err());
        assert_eq!(adapter.bridge_calls(), 0);
    }
}
