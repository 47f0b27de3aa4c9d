//! Bridge manager configuration.

use shared_types::ProtocolKind;
use std::time::Duration;

use super::errors::ManagerError;

/// Bridge manager configuration.
#[derive(Clone, Debug)]
pub struct BridgeManagerConfig {
    /// Preferred protocol order. Unlisted adapters follow in registration order.
    pub preference: Vec<ProtocolKind>,
    /// Exclude adapters below this success rate. Disabled when `None`.
    pub min_success_rate: Option<f64>,
    /// Deadline after which a `bridge()` call is logged as overdue. The call
    /// itself is never cancelled.
    pub bridge_timeout: Duration,
}

impl Default for BridgeManagerConfig {
    fn default() -> Self {
        Self {
            preference: Vec::new(),
            min_success_rate: None,
            bridge_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl BridgeManagerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ManagerError> {
        if let Some(rate) = self.min_success_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ManagerError::InvalidConfig(format!(
                    "min_success_rate must be within 0..=1, got {}",
                    rate
                )));
            }
        }
        if self.bridge_timeout.is_zero() {
            return Err(ManagerError::InvalidConfig(
                "bridge_timeout must be non-zero".to_string(),
            ));
        }
        for (i, kind) in self.preference.iter().enumerate() {
            if self.preference[..i].contains(kind) {
                return Err(ManagerError::InvalidConfig(format!(
                    "protocol {} listed twice in preference",
                    kind
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BridgeManagerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = BridgeManagerConfig {
            min_success_rate: Some(1.5),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BridgeManagerConfig {
            preference: vec![ProtocolKind::Attestation, ProtocolKind::Attestation],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BridgeManagerConfig {
            bridge_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
