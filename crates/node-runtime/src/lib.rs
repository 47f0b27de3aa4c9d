//! # Cross-Purchase Node Runtime
//!
//! Wires every subsystem together and serves the HTTP gateway.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration, lazy chain clients and subsystem wiring
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Validate the webhook secret when `XP_ENV=production`
//! 3. Initialize subsystems in dependency order (Level 0 → Level 4)
//! 4. Resume intents left in flight by a previous run
//! 5. Serve HTTP until shutdown is signalled
//!
//! ## Subsystems
//!
//! 1. Protocol Adapters (xp-01) - attestation, liquidity swap, contract event
//! 2. Bridge Manager (xp-02) - selection, health, fallback
//! 3. Intent Store (xp-03) - persisted lifecycle records
//! 4. Purchase Engine (xp-04) - bridge → mint → purchase state machine
//! 5. Event Ingestion (xp-05) - chainhook webhook parsing
//! 6. Status Poller (xp-06) - status queries and change watching
//! 7. API Gateway (xp-07) - HTTP surface

#![warn(clippy::all)]

pub mod container;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xp_01_protocol_adapters::TracingProgress;
use xp_07_api_gateway::GatewayService;

pub use crate::container::{ConfigError, LoggingConfig, NodeConfig, SubsystemContainer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The node runtime orchestrating all subsystems.
pub struct NodeRuntime {
    /// Subsystem container with all initialized services.
    container: Arc<SubsystemContainer>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Create a runtime with every subsystem initialized.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        info!("Creating cross-purchase node runtime");
        let container = Arc::new(SubsystemContainer::new(config)?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Recover intents left in flight. Returns how many were resumed.
    pub async fn start(&self) -> usize {
        let resumed = self
            .container
            .engine
            .resume_in_flight(Arc::new(TracingProgress))
            .await;
        info!(resumed, "Node runtime started");
        resumed
    }

    /// Serve HTTP until `shutdown()` is called.
    pub async fn run(&self) -> Result<()> {
        let gateway = GatewayService::new(
            self.container.config.gateway.clone(),
            self.container.app_state(),
        )
        .context("creating API gateway")?;
        let listener = gateway.bind().await.context("binding HTTP listener")?;

        let mut shutdown = self.shutdown_rx.clone();
        gateway
            .serve(listener, async move {
                let _ = shutdown.changed().await;
            })
            .await
            .context("serving HTTP")?;
        Ok(())
    }

    /// Signal shutdown. In-flight HTTP requests drain; spawned intent
    /// processing finishes with the process.
    pub fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }

    /// Shared container, for embedding and tests.
    pub fn container(&self) -> Arc<SubsystemContainer> {
        self.container.clone()
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured filter.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .context("parsing log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))
}
