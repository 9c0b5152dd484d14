//! Deferred win-panel message.

use parking_lot::RwLock;

/// Single-slot cache for the most recently rendered panel message.
///
/// Written by ticks, read by the round-end handler; last write wins. Reading
/// does not clear the slot, so the message keeps showing on every round end
/// until a later panel advert replaces it.
#[derive(Debug, Default)]
pub struct PanelCache {
    message: RwLock<Option<String>>,
}

impl PanelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the cached message.
    pub fn store(&self, message: impl Into<String>) {
        *self.message.write() = Some(message.into());
    }

    /// Cached message, `None` while idle.
    pub fn current(&self) -> Option<String> {
        self.message
            .read()
            .as_ref()
            .filter(|message| !message.is_empty())
            .cloned()
    }

    /// Whether a round end would fire the panel.
    pub fn is_armed(&self) -> bool {
        self.message
            .read()
            .as_ref()
            .is_some_and(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let cache = PanelCache::new();
        assert!(!cache.is_armed());
        assert_eq!(cache.current(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = PanelCache::new();
        cache.store("first");
        cache.store("second");
        assert_eq!(cache.current().as_deref(), Some("second"));
    }

    #[test]
    fn test_read_does_not_clear() {
        let cache = PanelCache::new();
        cache.store("sticky");
        assert_eq!(cache.current().as_deref(), Some("sticky"));
        assert_eq!(cache.current().as_deref(), Some("sticky"));
        assert!(cache.is_armed());
    }

    #[test]
    fn test_empty_message_is_idle() {
        let cache = PanelCache::new();
        cache.store("");
        assert!(!cache.is_armed());
        assert_eq!(cache.current(), None);
    }
}
