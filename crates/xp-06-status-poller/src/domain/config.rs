//! Poller configuration.

use super::backoff::BackoffSchedule;
use super::errors::PollerError;

/// Poller configuration.
#[derive(Clone, Debug, Default)]
pub struct PollerConfig {
    pub schedule: BackoffSchedule,
    /// Stop after this many polls. Unbounded when `None`.
    pub max_polls: Option<u32>,
}

impl PollerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), PollerError> {
        self.schedule.validate()?;
        if self.max_polls == Some(0) {
            return Err(PollerError::InvalidConfig(
                "max_polls must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
