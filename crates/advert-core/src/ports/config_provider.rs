//! Configuration provider port.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::AdvertConfig;

/// Port for the hot-reloadable configuration source.
///
/// Every published value is a complete, validated snapshot.
pub trait ConfigProvider: Send + Sync {
    /// The snapshot currently in effect.
    fn current(&self) -> Arc<AdvertConfig>;

    /// Subscribe to future snapshots.
    ///
    /// The receiver starts with the current value marked as seen; only
    /// later reloads wake it.
    fn subscribe(&self) -> watch::Receiver<Arc<AdvertConfig>>;
}

/// Provider over a fixed snapshot that never reloads on its own.
///
/// Used by tests and by hosts that push configuration programmatically.
pub struct StaticConfigProvider {
    sender: watch::Sender<Arc<AdvertConfig>>,
}

impl StaticConfigProvider {
    pub fn new(config: AdvertConfig) -> Self {
        let (sender, _) = watch::channel(Arc::new(config));
        Self { sender }
    }

    /// Publish a replacement snapshot to all subscribers.
    pub fn publish(&self, config: AdvertConfig) {
        self.sender.send_replace(Arc::new(config));
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn current(&self) -> Arc<AdvertConfig> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Arc<AdvertConfig>> {
        self.sender.subscribe()
    }
}
