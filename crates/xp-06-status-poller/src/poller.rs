//! # Status Poller
//!
//! One background task per watched intent. The task polls a `StatusSource`
//! on the backoff schedule and calls back only when the status changes.
//!
//! ```text
//! fetch ─► changed? ─► on_change ─► terminal? ─► stop
//!   │ error: log, keep going            │
//!   └──────── sleep(interval) ◄─────────┘  (cancel wakes the sleep)
//! ```

use shared_types::IntentStatus;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{PollerConfig, PollerError, StatusResponse};
use crate::ports::StatusSource;

/// Why a poller stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Intent reached a terminal status.
    Terminal,
    /// `cancel()` called or handle dropped.
    Cancelled,
    /// `max_polls` reached.
    MaxPolls,
}

/// What a finished poller observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSummary {
    pub polls: u32,
    pub changes: u32,
    pub last: Option<StatusResponse>,
    pub reason: StopReason,
}

/// Spawns pollers.
#[derive(Clone)]
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    config: PollerConfig,
}

impl StatusPoller {
    pub fn new(source: Arc<dyn StatusSource>, config: PollerConfig) -> Result<Self, PollerError> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// Watch an intent. Cancelling stops observation only; the intent's
    /// processing is unaffected.
    pub fn spawn<F>(&self, intent_id: impl Into<String>, on_change: F) -> PollerHandle
    where
        F: FnMut(&StatusResponse) + Send + 'static,
    {
        let intent_id = intent_id.into();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(run(
            self.source.clone(),
            self.config.clone(),
            intent_id.clone(),
            cancel_rx,
            on_change,
        ));
        PollerHandle {
            intent_id,
            cancel: cancel_tx,
            task,
        }
    }
}

/// Handle to a running poller. Dropping it cancels the poller.
pub struct PollerHandle {
    intent_id: String,
    cancel: watch::Sender<bool>,
    task: JoinHandle<PollSummary>,
}

impl PollerHandle {
    pub fn intent_id(&self) -> &str {
        &self.intent_id
    }

    /// Stop polling. Idempotent.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poller to stop.
    pub async fn join(self) -> PollSummary {
        let PollerHandle {
            intent_id,
            cancel,
            task,
        } = self;
        let summary = task.await;
        drop(cancel);
        summary.unwrap_or_else(|e| {
            warn!(intent_id = %intent_id, error = %e, "[xp-06] Poller task aborted");
            PollSummary {
                polls: 0,
                changes: 0,
                last: None,
                reason: StopReason::Cancelled,
            }
        })
    }
}

async fn run<F>(
    source: Arc<dyn StatusSource>,
    config: PollerConfig,
    intent_id: String,
    mut cancel: watch::Receiver<bool>,
    mut on_change: F,
) -> PollSummary
where
    F: FnMut(&StatusResponse) + Send + 'static,
{
    let mut polls = 0u32;
    let mut changes = 0u32;
    let mut seen: Option<IntentStatus> = None;
    let mut last: Option<StatusResponse> = None;

    let reason = loop {
        if *cancel.borrow() {
            break StopReason::Cancelled;
        }

        polls += 1;
        match source.fetch(&intent_id).await {
            Ok(status) => {
                if seen != Some(status.status) {
                    changes += 1;
                    debug!(
                        intent_id = %intent_id,
                        from = ?seen,
                        to = %status.status,
                        "[xp-06] Status changed"
                    );
                    on_change(&status);
                }
                seen = Some(status.status);
                let terminal = status.is_terminal();
                last = Some(status);
                if terminal {
                    break StopReason::Terminal;
                }
            }
            Err(e) => {
                warn!(intent_id = %intent_id, poll = polls, error = %e, "[xp-06] Status fetch failed");
            }
        }

        if config.max_polls.is_some_and(|max| polls >= max) {
            break StopReason::MaxPolls;
        }

        let delay = config.schedule.interval(polls);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = cancel.changed() => break StopReason::Cancelled,
        }
    };

    info!(
        intent_id = %intent_id,
        polls,
        changes,
        reason = ?reason,
        "[xp-06] Poller stopped"
    );
    PollSummary {
        polls,
        changes,
        last,
        reason,
    }
}
