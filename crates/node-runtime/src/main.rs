//! `node-runtime` binary: load config, wire subsystems, serve until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use node_runtime::{init_tracing, NodeConfig, NodeRuntime, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("loading configuration")?;
    init_tracing(&config.logging)?;

    info!(version = VERSION, "Starting cross-purchase node");
    if config.production {
        config
            .validate_for_production()
            .context("production configuration check")?;
    } else if !config.ingest.auth_enabled() {
        warn!("XP_WEBHOOK_SECRET not set, webhook and admin endpoints are unauthenticated");
    }

    let runtime = Arc::new(NodeRuntime::new(config).context("initializing subsystems")?);
    runtime.start().await;

    let mut server = {
        let runtime = runtime.clone();
        tokio::spawn(async move { runtime.run().await })
    };

    tokio::select! {
        result = &mut server => {
            return result.context("server task panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("listening for Ctrl+C")?;
            info!("Ctrl+C received");
        }
    }

    runtime.shutdown();
    server.await.context("server task panicked")??;
    info!("Node stopped");
    Ok(())
}
