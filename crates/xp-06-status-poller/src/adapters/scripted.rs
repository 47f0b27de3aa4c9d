//! Status source with queued answers.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::{PollerError, StatusResponse};
use crate::ports::StatusSource;

/// Returns queued answers in order, then repeats the last one.
#[derive(Debug, Default)]
pub struct ScriptedStatusSource {
    script: Mutex<VecDeque<Result<StatusResponse, PollerError>>>,
    last: Mutex<Option<Result<StatusResponse, PollerError>>>,
    fetches: AtomicU32,
}

impl ScriptedStatusSource {
    pub fn new(script: impl IntoIterator<Item = Result<StatusResponse, PollerError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Number of `fetch` calls so far.
    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for ScriptedStatusSource {
    async fn fetch(&self, _intent_id: &str) -> Result<StatusResponse, PollerError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock();
        if let Some(next) = self.script.lock().pop_front() {
            *last = Some(next);
        }
        last.clone()
            .unwrap_or_else(|| Err(PollerError::Source("no scripted status".into())))
    }
}
