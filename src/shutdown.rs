//! Control-plane shutdown signalling.

use std::sync::Arc;

use tokio::sync::Notify;

/// Connects the shutdown endpoint to the server's graceful-close future.
///
/// Clones share one signal; triggering before anyone waits still stops the
/// server (the notification is stored, not lost).
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Creates an untriggered handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the server to stop accepting connections and drain.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    /// Resolves once [`ShutdownHandle::trigger`] has been called.
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn trigger_before_wait_is_not_lost() {
        let handle = ShutdownHandle::new();
        handle.trigger();

        let waited = tokio::time::timeout(Duration::from_millis(50), handle.wait()).await;
        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn clones_share_the_signal() {
        let handle = ShutdownHandle::new();
        let clone = handle.clone();
        clone.trigger();

        let waited = tokio::time::timeout(Duration::from_millis(50), handle.wait()).await;
        assert!(waited.is_ok());
    }
}
