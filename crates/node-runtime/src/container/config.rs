//! # Node Configuration
//!
//! Unified configuration for all subsystems, overridable from `XP_*`
//! environment variables.
//!
//! ## Security Requirements
//!
//! - `XP_WEBHOOK_SECRET` MUST be set in production (`XP_ENV=production`)
//! - The admin token defaults to the webhook secret

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use shared_types::ProtocolKind;
use xp_02_bridge_manager::BridgeManagerConfig;
use xp_04_purchase_engine::EngineConfig;
use xp_05_event_ingestion::IngestConfig;
use xp_06_status_poller::PollerConfig;
use xp_07_api_gateway::GatewayConfig;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub gateway: GatewayConfig,
    pub engine: EngineConfig,
    pub bridges: BridgeManagerConfig,
    pub ingest: IngestConfig,
    pub poller: PollerConfig,
    pub logging: LoggingConfig,
    /// Enforce production checks at startup.
    pub production: bool,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Webhook secret is empty.
    #[error(
        "SECURITY VIOLATION: webhook secret is empty. \
         Set XP_WEBHOOK_SECRET environment variable."
    )]
    InsecureWebhookSecret,

    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// A subsystem rejected its configuration.
    #[error("Subsystem configuration rejected: {0}")]
    Subsystem(String),
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("XP_HTTP_HOST") {
            config.gateway.host = parse("XP_HTTP_HOST", &raw)?;
        }
        if let Some(raw) = get("XP_HTTP_PORT") {
            config.gateway.port = parse("XP_HTTP_PORT", &raw)?;
        }
        if let Some(secret) = get("XP_WEBHOOK_SECRET") {
            config.gateway.admin_token = secret.clone();
            config.ingest.webhook_secret = secret;
        }
        if let Some(token) = get("XP_ADMIN_TOKEN") {
            config.gateway.admin_token = token;
        }
        if let Some(raw) = get("XP_MAX_FAILURES") {
            config.engine.max_failures = parse("XP_MAX_FAILURES", &raw)?;
        }
        if let Some(raw) = get("XP_RETRY_DELAY_MS") {
            config.engine.retry_delay = Duration::from_millis(parse("XP_RETRY_DELAY_MS", &raw)?);
        }
        if let Some(raw) = get("XP_BRIDGE_TIMEOUT_SECS") {
            config.bridges.bridge_timeout =
                Duration::from_secs(parse("XP_BRIDGE_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = get("XP_PROTOCOL_PREFERENCE") {
            config.bridges.preference = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| parse::<ProtocolKind>("XP_PROTOCOL_PREFERENCE", name))
                .collect::<Result<_, _>>()?;
        }
        if let Some(raw) = get("XP_MIN_SUCCESS_RATE") {
            config.bridges.min_success_rate = Some(parse("XP_MIN_SUCCESS_RATE", &raw)?);
        }
        if let Some(raw) = get("XP_LOG_JSON") {
            config.logging.json = parse_flag("XP_LOG_JSON", &raw)?;
        }
        if let Some(env) = get("XP_ENV") {
            config.production = env.eq_ignore_ascii_case("production");
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate every subsystem's configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let subsystem = |e: &dyn std::fmt::Display| ConfigError::Subsystem(e.to_string());
        self.gateway.validate().map_err(|e| subsystem(&e))?;
        self.engine.validate().map_err(|e| subsystem(&e))?;
        self.bridges.validate().map_err(|e| subsystem(&e))?;
        self.ingest.validate().map_err(|e| subsystem(&e))?;
        self.poller.validate().map_err(|e| subsystem(&e))?;
        Ok(())
    }

    /// Validate configuration for production readiness.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.ingest.webhook_secret.trim().is_empty() {
            return Err(ConfigError::InsecureWebhookSecret);
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<NodeConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.engine.max_failures, 3);
        assert!(config.bridges.min_success_rate.is_none());
        assert!(!config.production);
        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::InsecureWebhookSecret)
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("XP_HTTP_PORT", "9090"),
            ("XP_WEBHOOK_SECRET", "s3cret"),
            ("XP_MAX_FAILURES", "5"),
            ("XP_RETRY_DELAY_MS", "250"),
            ("XP_BRIDGE_TIMEOUT_SECS", "60"),
            ("XP_PROTOCOL_PREFERENCE", "liquidity_swap, attestation"),
            ("XP_MIN_SUCCESS_RATE", "0.4"),
            ("XP_LOG_JSON", "1"),
            ("XP_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(config.gateway.port, 9090);
        assert_eq!(config.gateway.admin_token, "s3cret");
        assert_eq!(config.ingest.webhook_secret, "s3cret");
        assert_eq!(config.engine.max_failures, 5);
        assert_eq!(config.engine.retry_delay, Duration::from_millis(250));
        assert_eq!(config.bridges.bridge_timeout, Duration::from_secs(60));
        assert_eq!(
            config.bridges.preference,
            vec![ProtocolKind::LiquiditySwap, ProtocolKind::Attestation]
        );
        assert_eq!(config.bridges.min_success_rate, Some(0.4));
        assert!(config.logging.json);
        assert!(config.production);
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("XP_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue { key: "XP_HTTP_PORT", .. })
        ));
        assert!(matches!(
            load(&[("XP_PROTOCOL_PREFERENCE", "teleport")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("XP_LOG_JSON", "maybe")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_admin_token_override() {
        let config = load(&[("XP_WEBHOOK_SECRET", "hook"), ("XP_ADMIN_TOKEN", "admin")]).unwrap();
        assert_eq!(config.ingest.webhook_secret, "hook");
        assert_eq!(config.gateway.admin_token, "admin");
    }
}
