//! # Protocol Health
//!
//! Per-adapter success/failure counters. Each adapter owns one
//! `HealthTracker`; only the bridge manager records into it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds deciding `is_healthy`.
#[derive(Clone, Debug)]
pub struct HealthPolicy {
    /// Success rate below which an adapter is unhealthy.
    pub min_success_rate: f64,
    /// Consecutive failures that open the cool-down window.
    pub failure_streak: u32,
    /// Cool-down after a failure streak.
    pub cooldown: Duration,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            min_success_rate: 0.5,
            failure_streak: 3,
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Health snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolHealth {
    pub success_count: u64,
    pub failure_count: u64,
    pub consecutive_failures: u32,
    pub total_time_ms: u64,
    pub average_time_ms: u64,
    pub last_failure_at: Option<u64>,
    /// 1.0 when no attempts have been recorded.
    pub success_rate: f64,
    pub is_healthy: bool,
}

#[derive(Debug, Default)]
struct HealthState {
    success_count: u64,
    failure_count: u64,
    consecutive_failures: u32,
    total_time_ms: u64,
    last_failure_at: Option<u64>,
}

/// Thread-safe health counters.
#[derive(Debug, Default)]
pub struct HealthTracker {
    policy: HealthPolicy,
    state: Mutex<HealthState>,
}

impl HealthTracker {
    /// Create a tracker with a custom policy.
    pub fn new(policy: HealthPolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(HealthState::default()),
        }
    }

    /// Record a successful bridge.
    pub fn record_success(&self, elapsed_ms: u64) {
        let mut state = self.state.lock();
        state.success_count += 1;
        state.consecutive_failures = 0;
        state.total_time_ms = state.total_time_ms.saturating_add(elapsed_ms);
    }

    /// Record a failed bridge at `now` (unix ms).
    pub fn record_failure(&self, elapsed_ms: u64, now: u64) {
        let mut state = self.state.lock();
        state.failure_count += 1;
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        state.total_time_ms = state.total_time_ms.saturating_add(elapsed_ms);
        state.last_failure_at = Some(now);
    }

    /// Forget all history.
    pub fn reset(&self) {
        *self.state.lock() = HealthState::default();
    }

    /// Snapshot evaluated at `now` (unix ms).
    pub fn snapshot(&self, now: u64) -> ProtocolHealth {
        let state = self.state.lock();
        let attempts = state.success_count + state.failure_count;
        let success_rate = if attempts == 0 {
            1.0
        } else {
            state.success_count as f64 / attempts as f64
        };

        let cooling_down = state.consecutive_failures >= self.policy.failure_streak
            && state.last_failure_at.is_some_and(|at| {
                now.saturating_sub(at) < self.policy.cooldown.as_millis() as u64
            });

        ProtocolHealth {
            success_count: state.success_count,
            failure_count: state.failure_count,
            consecutive_failures: state.consecutive_failures,
            total_time_ms: state.total_time_ms,
            average_time_ms: if attempts == 0 {
                0
            } else {
                state.total_time_ms / attempts
            },
            last_failure_at: state.last_failure_at,
            success_rate,
            is_healthy: success_rate >= self.policy.min_success_rate && !cooling_down,
        }
    }
}
