//! # Node Flows
//!
//! The fully wired node (simulated chains, all three protocols) exercised
//! over its HTTP surface.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use node_runtime::{NodeConfig, SubsystemContainer};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;
    use xp_07_api_gateway::build_router;

    fn node() -> Router {
        let mut config = NodeConfig::default();
        config.ingest.webhook_secret = WEBHOOK_SECRET.into();
        config.gateway.admin_token = WEBHOOK_SECRET.into();
        let container = SubsystemContainer::new(config).unwrap();
        build_router(container.app_state(), &container.config.gateway)
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn wait_terminal(app: &Router, id: &str) -> Value {
        for _ in 0..200 {
            let (_, body) = call(app, get(&format!("/status/{}", id))).await;
            if body["status"] == "executed" || body["status"] == "failed" {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("intent {} never reached a terminal status", id);
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_http_purchase_over_simulated_chains() {
        let app = node();
        let request = Request::post("/intents")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "sourceChain": "ethereum",
                    "destinationChain": "base",
                    "amount": "150",
                    "sourceAddress": ETH_ADDRESS,
                    "destinationAddress": BASE_ADDRESS,
                    "token": "usdc",
                    "units": 10
                })
                .to_string(),
            ))
            .unwrap();

        let (status, created) = call(&app, request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let id = created["id"].as_str().unwrap().to_string();

        let done = wait_terminal(&app, &id).await;
        assert_eq!(done["status"], "executed");
        assert_eq!(done["receipt"]["units"], 10);
        assert!(done["sourceTxId"].is_string());
    }

    #[tokio::test]
    async fn test_webhook_to_executed_purchase() {
        let app = node();
        let body = chainhook(vec![purchase_tx(
            "0xdd01",
            json!({"base-address": BASE_ADDRESS, "stx-amount": "u40", "units": "u4"}),
        )]);
        let request = Request::post("/webhook")
            .header(header::AUTHORIZATION, bearer(WEBHOOK_SECRET))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let (status, ack) = call(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack, json!({"status": "received"}));

        let done = wait_terminal(&app, "0xdd01").await;
        assert_eq!(done["status"], "executed");
        assert_eq!(done["receipt"]["protocol"], "contract_event");
    }

    #[tokio::test]
    async fn test_health_lists_every_protocol() {
        let (status, body) = call(&node(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        for protocol in ["attestation", "liquidity_swap", "contract_event"] {
            assert!(body["protocols"][protocol].is_object(), "{} missing", protocol);
        }
    }
}
