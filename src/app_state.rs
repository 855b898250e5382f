//! Shared application state injected into all Axum handlers.

use std::fmt;
use std::sync::Arc;

use crate::config::HookConfig;
use crate::service::ImageUpdater;
use crate::shutdown::ShutdownHandle;

/// Shared state available to handlers via Axum's `State` extractor.
///
/// Nothing here is mutated per-request: the configuration is read-only
/// after startup and the updater is stateless.
#[derive(Clone)]
pub struct AppState {
    /// Webhook configuration, read-only after startup.
    pub config: Arc<HookConfig>,

    /// Swarm updater invoked for mapped images.
    pub updater: Arc<dyn ImageUpdater>,

    /// Handle the shutdown endpoint signals through.
    pub shutdown: ShutdownHandle,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}
