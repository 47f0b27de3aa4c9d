//! # Purchase Engine Service
//!
//! Drives an intent from creation to a terminal state:
//!
//! ```text
//! bridge ──ok──► (mint) ──ok──► purchase ──ok──► executed
//!   │ retryable + under ceiling: wait, next candidate adapter
//!   └ otherwise ───────────────────────────────────────► failed
//! ```
//!
//! One task drives a given intent at a time (`KeyedLocks`); every state
//! change is a compare-and-swap write through `IntentService`.

use async_trait::async_trait;
use dashmap::DashMap;
use shared_types::{
    now_millis, BridgeErrorCode, Intent, IntentRequest, IntentStatus, ProtocolKind,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use xp_01_protocol_adapters::{
    BridgeDetails, BridgeParams, ProgressReporter, ProgressStage, TracingProgress,
};
use xp_02_bridge_manager::{should_trigger_fallback, BridgeExecution, BridgeManager};
use xp_03_intent_store::{IntentService, KeyedLocks, StoreError};

use crate::domain::{generate_intent_id, EngineConfig, EngineError, StepError};
use crate::ports::{IntentProcessor, MintClaimer, PurchaseExecutor};

/// Intent processing engine.
#[derive(Clone)]
pub struct PurchaseEngine {
    config: EngineConfig,
    intents: IntentService,
    bridges: Arc<BridgeManager>,
    minter: Arc<dyn MintClaimer>,
    purchaser: Arc<dyn PurchaseExecutor>,
    locks: Arc<KeyedLocks>,
    /// Attestation details held between bridge and mint.
    pending_mints: Arc<DashMap<String, BridgeDetails>>,
}

impl PurchaseEngine {
    /// Create the engine.
    pub fn new(
        config: EngineConfig,
        intents: IntentService,
        bridges: Arc<BridgeManager>,
        minter: Arc<dyn MintClaimer>,
        purchaser: Arc<dyn PurchaseExecutor>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            intents,
            bridges,
            minter,
            purchaser,
            locks: Arc::new(KeyedLocks::new()),
            pending_mints: Arc::new(DashMap::new()),
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bridge manager in use.
    pub fn bridges(&self) -> &Arc<BridgeManager> {
        &self.bridges
    }

    /// Intent service in use.
    pub fn intents(&self) -> &IntentService {
        &self.intents
    }

    /// Validate a request and store a `pending` intent.
    pub async fn create_intent(&self, request: IntentRequest) -> Result<Intent, EngineError> {
        request.validate()?;
        let now = now_millis();
        let id = request
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generate_intent_id(now));
        let intent = Intent::new(id, &request, now);
        Ok(self.intents.create(intent).await?)
    }

    /// Create, then process to a terminal state.
    pub async fn submit_intent(
        &self,
        request: IntentRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        let intent = self.create_intent(request).await?;
        self.process_intent(&intent.id, progress).await
    }

    /// Create, then process on a background task. Returns the `pending` intent.
    pub async fn spawn_intent(
        &self,
        request: IntentRequest,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Intent, EngineError> {
        let intent = self.create_intent(request).await?;
        self.spawn_processing(intent.id.clone(), progress);
        Ok(intent)
    }

    /// Process an existing intent on a background task.
    pub fn spawn_processing(
        &self,
        id: String,
        progress: Arc<dyn ProgressReporter>,
    ) -> JoinHandle<Result<Intent, EngineError>> {
        let engine = self.clone();
        tokio::spawn(async move {
            let result = engine.process_intent(&id, progress.as_ref()).await;
            if let Err(e) = &result {
                warn!(intent_id = %id, error = %e, "[xp-04] Background processing stopped");
            }
            result
        })
    }

    /// Drive an intent until it is terminal.
    ///
    /// Rejects with `AlreadyInFlight` if another task is driving it. A
    /// terminal intent is returned unchanged.
    pub async fn process_intent(
        &self,
        id: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        let guard = self
            .locks
            .try_acquire(id)
            .ok_or_else(|| EngineError::AlreadyInFlight(id.to_string()))?;

        let result = self.drive(id, progress).await;

        drop(guard);
        self.locks.prune();
        result
    }

    async fn drive(&self, id: &str, progress: &dyn ProgressReporter) -> Result<Intent, EngineError> {
        let mut intent = self.intents.get(id).await?;
        while !intent.is_terminal() {
            intent = match intent.status {
                IntentStatus::AwaitingMint => self.mint_step(intent, progress).await?,
                IntentStatus::Purchasing => self.purchase_step(intent, progress).await?,
                _ => self.bridge_step(intent, progress).await?,
            };
        }
        self.pending_mints.remove(id);
        Ok(intent)
    }

    async fn bridge_step(
        &self,
        intent: Intent,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        if let Some(tripped) = self.check_breaker(&intent, progress).await? {
            return Ok(tripped);
        }

        let tried = intent.tried_protocols();
        let order = match self.bridges.fallback_order(
            intent.source_chain,
            intent.destination_chain,
            &tried,
        ) {
            Ok(order) => order,
            Err(e) => return self.fail(&intent.id, e.code(), &e.to_string(), progress).await,
        };

        // Nothing is committed until an adapter accepts the parameters.
        let params = BridgeParams::from_intent(&intent);
        let mut accepted = None;
        let mut rejection: Option<BridgeExecution> = None;
        for candidate in order {
            match self.bridges.validate(candidate.as_ref(), &params).await {
                Ok(()) => {
                    accepted = Some(candidate);
                    break;
                }
                Err(rejected) => rejection = Some(rejected),
            }
        }
        let adapter = match (accepted, rejection) {
            (Some(adapter), _) => adapter,
            (None, Some(rejected)) => {
                let code = rejected
                    .error_code()
                    .unwrap_or(BridgeErrorCode::NoRoute);
                return self
                    .fail(&intent.id, code, rejected.error_message(), progress)
                    .await;
            }
            (None, None) => {
                return self
                    .fail(
                        &intent.id,
                        BridgeErrorCode::NoRoute,
                        "no capable adapter for route",
                        progress,
                    )
                    .await
            }
        };

        let kind = adapter.kind();
        let (intent, attempt) = self
            .intents
            .mutate(&intent.id, |i, now| {
                if i.open_attempt().is_some() {
                    i.finish_attempt(
                        false,
                        Some((
                            BridgeErrorCode::NetworkError,
                            "interrupted before completion".to_string(),
                        )),
                        now,
                    )?;
                }
                i.transition_to(IntentStatus::Bridging, now)?;
                Ok(i.begin_attempt(kind, now))
            })
            .await?;
        info!(
            intent_id = %intent.id,
            protocol = %kind,
            attempt,
            failures = intent.failure_count,
            "[xp-04] Bridge attempt started"
        );

        let execution = self
            .bridges
            .bridge(adapter.as_ref(), &params, progress)
            .await;

        if execution.result.success {
            return self.bridge_succeeded(&intent.id, kind, execution).await;
        }

        let code = execution
            .error_code()
            .unwrap_or(BridgeErrorCode::NetworkError);
        let message = execution.error_message().to_string();
        let source_tx = execution.result.source_tx_hash.clone();
        let (intent, _) = self
            .intents
            .mutate(&intent.id, |i, now| {
                i.finish_attempt(false, Some((code, message.clone())), now)?;
                if let Some(hash) = &source_tx {
                    i.record_source_tx(hash, now)?;
                }
                i.record_failure(code, message.as_str(), now);
                Ok(())
            })
            .await?;
        if let Some(hash) = &source_tx {
            warn!(
                intent_id = %intent.id,
                protocol = %kind,
                source_tx = %hash,
                "[xp-04] Bridge attempt failed after submitting a source transaction"
            );
        }
        self.after_failure(intent, code, &message, progress).await
    }

    async fn bridge_succeeded(
        &self,
        id: &str,
        kind: ProtocolKind,
        execution: BridgeExecution,
    ) -> Result<Intent, EngineError> {
        let result = execution.result;
        let requires_mint = result.requires_mint;
        if requires_mint {
            self.pending_mints
                .insert(id.to_string(), result.details.clone().unwrap_or_default());
        }

        let next = if requires_mint {
            IntentStatus::AwaitingMint
        } else {
            IntentStatus::Purchasing
        };
        let source_tx = result.source_tx_hash.clone();
        let (intent, _) = self
            .intents
            .mutate(id, |i, now| {
                i.finish_attempt(true, None, now)?;
                if let Some(hash) = &source_tx {
                    i.record_source_tx(hash, now)?;
                }
                i.clear_error(now);
                i.transition_to(next, now)
            })
            .await?;
        info!(
            intent_id = %id,
            protocol = %kind,
            elapsed_ms = execution.elapsed_ms,
            next = %next,
            "[xp-04] Bridge completed"
        );
        Ok(intent)
    }

    async fn mint_step(
        &self,
        intent: Intent,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        if let Some(tripped) = self.check_breaker(&intent, progress).await? {
            return Ok(tripped);
        }

        let details = self
            .pending_mints
            .get(&intent.id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        match self.minter.claim(&intent, &details).await {
            Ok(hash) => {
                let (intent, _) = self
                    .intents
                    .mutate(&intent.id, |i, now| {
                        i.set_mint_tx_hash(&hash, now)?;
                        i.clear_error(now);
                        i.transition_to(IntentStatus::Purchasing, now)
                    })
                    .await?;
                self.pending_mints.remove(&intent.id);
                info!(intent_id = %intent.id, mint_tx = %hash, "[xp-04] Mint claimed");
                Ok(intent)
            }
            Err(e) => self.step_failed(intent, "mint", e, progress).await,
        }
    }

    async fn purchase_step(
        &self,
        intent: Intent,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        if let Some(tripped) = self.check_breaker(&intent, progress).await? {
            return Ok(tripped);
        }

        match self.purchaser.purchase(&intent).await {
            Ok(hash) => {
                let (intent, _) = self
                    .intents
                    .mutate(&intent.id, |i, now| {
                        i.set_purchase_tx_hash(&hash, now)?;
                        i.clear_error(now);
                        i.transition_to(IntentStatus::Executed, now)
                    })
                    .await?;
                progress.report(&intent.id, ProgressStage::Completed, Some(&hash));
                info!(
                    intent_id = %intent.id,
                    purchase_tx = %hash,
                    units = intent.units.unwrap_or(0),
                    "[xp-04] Purchase executed"
                );
                Ok(intent)
            }
            Err(e) => self.step_failed(intent, "purchase", e, progress).await,
        }
    }

    async fn step_failed(
        &self,
        intent: Intent,
        step: &'static str,
        error: StepError,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        warn!(
            intent_id = %intent.id,
            step,
            code = %error.code,
            error = %error.message,
            "[xp-04] Destination step failed"
        );
        let (intent, _) = self
            .intents
            .mutate(&intent.id, |i, now| {
                i.record_failure(error.code, error.message.as_str(), now);
                Ok(())
            })
            .await?;
        self.after_failure(intent, error.code, &error.message, progress)
            .await
    }

    /// Fail the intent if it already reached the failure ceiling.
    async fn check_breaker(
        &self,
        intent: &Intent,
        progress: &dyn ProgressReporter,
    ) -> Result<Option<Intent>, EngineError> {
        let max = self.config.max_failures;
        if intent.failure_count < max {
            return Ok(None);
        }
        let message = format!(
            "Intent failed {} times (limit {})",
            intent.failure_count, max
        );
        let failed = self
            .fail(&intent.id, BridgeErrorCode::TooManyFailures, &message, progress)
            .await?;
        Ok(Some(failed))
    }

    /// Decide between retrying and failing after a recorded failure.
    async fn after_failure(
        &self,
        intent: Intent,
        code: BridgeErrorCode,
        message: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        let max = self.config.max_failures;
        if intent.failure_count > max {
            let message = format!(
                "{} (failure {} exceeds limit {})",
                message, intent.failure_count, max
            );
            return self
                .fail(&intent.id, BridgeErrorCode::TooManyFailures, &message, progress)
                .await;
        }
        if !should_trigger_fallback(code) {
            return self.fail(&intent.id, code, message, progress).await;
        }

        debug!(
            intent_id = %intent.id,
            code = %code,
            failures = intent.failure_count,
            delay_ms = self.config.retry_delay.as_millis() as u64,
            "[xp-04] Retrying after retryable failure"
        );
        tokio::time::sleep(self.config.retry_delay).await;
        Ok(intent)
    }

    async fn fail(
        &self,
        id: &str,
        code: BridgeErrorCode,
        message: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<Intent, EngineError> {
        let (intent, _) = self
            .intents
            .mutate(id, |i, now| i.fail(code, message, now))
            .await?;
        self.pending_mints.remove(id);
        progress.report(id, ProgressStage::Failed, Some(message));
        warn!(
            intent_id = %id,
            code = %code,
            error = %message,
            failures = intent.failure_count,
            "[xp-04] Intent failed"
        );
        Ok(intent)
    }

    /// Caller is authorizing the source transaction.
    pub async fn record_signing(&self, id: &str) -> Result<Intent, EngineError> {
        Ok(self.intents.transition(id, IntentStatus::Signing).await?)
    }

    /// Caller submitted the source transaction.
    pub async fn record_broadcast(
        &self,
        id: &str,
        source_tx_hash: &str,
    ) -> Result<Intent, EngineError> {
        let (intent, _) = self
            .intents
            .mutate(id, |i, now| {
                i.transition_to(IntentStatus::Broadcasting, now)?;
                i.set_source_tx_hash(source_tx_hash, now)
            })
            .await?;
        info!(intent_id = %id, source_tx = %source_tx_hash, "[xp-04] Source transaction recorded");
        Ok(intent)
    }

    /// Fetch an intent.
    pub async fn get_intent(&self, id: &str) -> Result<Intent, EngineError> {
        Ok(self.intents.get(id).await?)
    }

    /// Intents where `address` participates, newest first.
    pub async fn list_intents(&self, address: &str) -> Vec<Intent> {
        self.intents.list_by_address(address).await
    }

    /// Restart processing of intents left mid-flight. Intents still in a
    /// caller-driven state are left for the caller.
    pub async fn resume_in_flight(&self, progress: Arc<dyn ProgressReporter>) -> usize {
        let mut resumed = 0;
        for intent in self.intents.list_in_flight().await {
            let engine_owned = matches!(
                intent.status,
                IntentStatus::Bridging | IntentStatus::AwaitingMint | IntentStatus::Purchasing
            );
            if engine_owned && !self.locks.is_held(&intent.id) {
                self.spawn_processing(intent.id.clone(), progress.clone());
                resumed += 1;
            }
        }
        if resumed > 0 {
            info!(resumed, "[xp-04] Resumed in-flight intents");
        }
        resumed
    }
}

#[async_trait]
impl IntentProcessor for PurchaseEngine {
    async fn process_request(&self, request: IntentRequest) -> Result<Intent, EngineError> {
        if let Some(id) = request.id.as_deref() {
            if let Some(existing) = self.intents.find(id).await {
                debug!(intent_id = %id, "[xp-04] Duplicate request, returning existing intent");
                return Ok(existing);
            }
        }

        match self.create_intent(request).await {
            Ok(intent) => {
                self.spawn_processing(intent.id.clone(), Arc::new(TracingProgress));
                Ok(intent)
            }
            Err(EngineError::Store(StoreError::AlreadyExists(id))) => self.get_intent(&id).await,
            Err(e) => Err(e),
        }
    }
}
