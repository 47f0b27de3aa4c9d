//! # Ingestion Service
//!
//! Turns an authenticated webhook batch into intent requests. Every
//! transaction is handled on its own; one bad transaction only moves a
//! counter in the `BatchReport`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use xp_04_purchase_engine::EngineError;

use crate::algorithms::extract_request;
use crate::auth::verify_bearer;
use crate::domain::{BatchReport, ChainhookPayload, IngestConfig, IngestError, TransactionEvent};
use crate::ports::{IntentProcessor, WebhookIngestor};

/// Webhook ingestion service.
pub struct IngestionService {
    config: IngestConfig,
    processor: Arc<dyn IntentProcessor>,
}

impl IngestionService {
    /// Create the service.
    pub fn new(
        config: IngestConfig,
        processor: Arc<dyn IntentProcessor>,
    ) -> Result<Self, IngestError> {
        config.validate()?;
        if !config.auth_enabled() {
            warn!("[xp-05] Webhook secret is empty, authentication disabled");
        }
        Ok(Self { config, processor })
    }

    /// Ingestion configuration.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Check an `Authorization` header value.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), IngestError> {
        if !self.config.auth_enabled()
            || verify_bearer(authorization, &self.config.webhook_secret)
        {
            return Ok(());
        }
        warn!(
            header_present = authorization.is_some(),
            "[xp-05] Webhook authentication failed"
        );
        Err(IngestError::Unauthorized)
    }

    /// Ingest a parsed payload.
    pub async fn ingest_payload(&self, payload: &ChainhookPayload) -> BatchReport {
        self.ingest_batch(payload).await.0
    }

    async fn ingest_batch(&self, payload: &ChainhookPayload) -> (BatchReport, Option<EngineError>) {
        let mut report = BatchReport::default();
        let mut last_error = None;

        for block in &payload.rollback {
            for tx in &block.transactions {
                report.rolled_back += 1;
                warn!(
                    block = block.height(),
                    tx_hash = %tx.hash(),
                    "[xp-05] Rollback received, ignoring"
                );
            }
        }

        for block in &payload.apply {
            for tx in &block.transactions {
                report.transactions += 1;
                if let Err(e) = self.ingest_transaction(tx, &mut report).await {
                    last_error = Some(e);
                }
            }
        }

        info!(
            transactions = report.transactions,
            matched = report.matched,
            submitted = report.submitted,
            malformed = report.malformed,
            rejected = report.rejected,
            errors = report.errors,
            rolled_back = report.rolled_back,
            "[xp-05] Webhook batch processed"
        );
        (report, last_error)
    }

    async fn ingest_transaction(
        &self,
        tx: &TransactionEvent,
        report: &mut BatchReport,
    ) -> Result<(), EngineError> {
        if !tx.succeeded() {
            report.failed_transactions += 1;
            debug!(tx_hash = %tx.hash(), "[xp-05] Skipping failed transaction");
            return Ok(());
        }

        let request = match extract_request(tx, &self.config) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(()),
            Err(e) => {
                report.matched += 1;
                report.malformed += 1;
                warn!(tx_hash = %tx.hash(), error = %e, "[xp-05] Malformed purchase event");
                return Ok(());
            }
        };
        report.matched += 1;

        match self.processor.process_request(request).await {
            Ok(intent) => {
                report.submitted += 1;
                info!(
                    tx_hash = %tx.hash(),
                    intent_id = %intent.id,
                    status = %intent.status,
                    "[xp-05] Purchase event accepted"
                );
                Ok(())
            }
            Err(EngineError::Validation(e)) => {
                report.rejected += 1;
                warn!(tx_hash = %tx.hash(), error = %e, "[xp-05] Purchase event rejected");
                Ok(())
            }
            Err(e) => {
                report.errors += 1;
                warn!(tx_hash = %tx.hash(), error = %e, "[xp-05] Intent processor error");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl WebhookIngestor for IngestionService {
    async fn ingest(
        &self,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<BatchReport, IngestError> {
        self.authorize(authorization)?;

        let payload = ChainhookPayload::from_slice(body).map_err(|e| {
            warn!(error = %e, bytes = body.len(), "[xp-05] Unparsable webhook body");
            IngestError::MalformedPayload(e.to_string())
        })?;

        let (report, last_error) = self.ingest_batch(&payload).await;
        match last_error {
            Some(e) if report.processor_down() => {
                Err(IngestError::ProcessorUnavailable(e.to_string()))
            }
            _ => Ok(report),
        }
    }
}
