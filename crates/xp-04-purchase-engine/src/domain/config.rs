//! Purchase engine configuration.

use std::time::Duration;

use super::errors::EngineError;

/// Default failure ceiling.
pub const DEFAULT_MAX_FAILURES: u32 = 3;

/// Purchase engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Circuit-breaker ceiling on an intent's `failure_count`.
    pub max_failures: u32,
    /// Pause before retrying a retryable failure.
    pub retry_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_failures: DEFAULT_MAX_FAILURES,
            retry_delay: Duration::from_secs(2),
        }
    }
}

impl EngineConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_failures == 0 {
            return Err(EngineError::InvalidConfig(
                "max_failures must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
