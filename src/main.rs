//! swarm-webhookd server entry point.
//!
//! Starts the Axum HTTP server that turns registry push notifications into
//! swarm service updates.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use swarm_webhookd::api;
use swarm_webhookd::app_state::AppState;
use swarm_webhookd::config::AppConfig;
use swarm_webhookd::service::{EnvDockerConnector, SwarmUpdater};
use swarm_webhookd::shutdown::ShutdownHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration; a broken blob aborts before the listener binds
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting swarm-webhookd");

    // Build the updater and shared state
    let updater = SwarmUpdater::new(EnvDockerConnector, config.hooks.registry.clone());
    let shutdown = ShutdownHandle::new();
    let state = AppState {
        config: Arc::new(config.hooks),
        updater: Arc::new(updater),
        shutdown: shutdown.clone(),
    };

    // Build router
    let app = api::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    tracing::info!("listener closed");
    Ok(())
}
