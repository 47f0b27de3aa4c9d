//! Poll interval schedule.

use std::time::Duration;

use super::errors::PollerError;

/// Stepped poll interval: each tier applies up to and including its poll
/// number, `cap` applies after the last tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffSchedule {
    pub tiers: Vec<(u32, Duration)>,
    pub cap: Duration,
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                (10, Duration::from_secs(3)),
                (30, Duration::from_secs(5)),
                (60, Duration::from_secs(10)),
            ],
            cap: Duration::from_secs(15),
        }
    }
}

impl BackoffSchedule {
    /// Same interval for every poll.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            tiers: Vec::new(),
            cap: interval,
        }
    }

    /// Wait after the `poll`-th poll (1-based).
    pub fn interval(&self, poll: u32) -> Duration {
        self.tiers
            .iter()
            .find(|(upto, _)| poll <= *upto)
            .map(|(_, interval)| *interval)
            .unwrap_or(self.cap)
    }

    /// Validate the schedule.
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.cap.is_zero() || self.tiers.iter().any(|(_, d)| d.is_zero()) {
            return Err(PollerError::InvalidConfig(
                "poll intervals must be non-zero".into(),
            ));
        }
        if self.tiers.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(PollerError::InvalidConfig(
                "backoff tiers must be strictly increasing".into(),
            ));
        }
        if self.tiers.windows(2).any(|w| w[0].1 > w[1].1) {
            return Err(PollerError::InvalidConfig(
                "backoff intervals must not shrink".into(),
            ));
        }
        if let Some((_, last)) = self.tiers.last() {
            if self.cap < *last {
                return Err(PollerError::InvalidConfig(format!(
                    "backoff cap {:?} is below the last tier interval {:?}",
                    self.cap, last
                )));
            }
        }
        Ok(())
    }
}
