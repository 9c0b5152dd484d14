//! Round-robin rotation over the configured ad groups.
//!
//! The active configuration snapshot and the rotation index live together so
//! that a reload swaps the snapshot and resets the index in one step.

use std::sync::Arc;

use crate::config::{AdGroup, AdvertConfig};

/// One tick's pick: the snapshot it was taken from and the group position.
#[derive(Debug, Clone)]
pub struct Selection {
    config: Arc<AdvertConfig>,
    index: usize,
}

impl Selection {
    /// Snapshot the selection was made against.
    pub fn config(&self) -> &AdvertConfig {
        &self.config
    }

    /// Position of the selected group in the rotation.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn group(&self) -> &AdGroup {
        &self.config.advert_list[self.index]
    }
}

/// Active configuration plus the position of the next group to emit.
#[derive(Debug, Clone)]
pub struct AdRotation {
    config: Arc<AdvertConfig>,
    index: usize,
}

impl AdRotation {
    pub const fn new(config: Arc<AdvertConfig>) -> Self {
        Self { config, index: 0 }
    }

    pub const fn config(&self) -> &Arc<AdvertConfig> {
        &self.config
    }

    /// Index of the group the next tick will select.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Swap in a new snapshot and restart the rotation from the first group.
    pub fn replace(&mut self, config: Arc<AdvertConfig>) {
        self.config = config;
        self.index = 0;
    }

    /// Select the current group and advance, wrapping at the end of the list.
    ///
    /// Returns `None` without touching the index when the list is empty.
    pub fn advance(&mut self) -> Option<Selection> {
        let len = self.config.advert_list.len();
        if len == 0 {
            return None;
        }

        let index = if self.index >= len { 0 } else { self.index };
        self.index = (index + 1) % len;

        Some(Selection {
            config: Arc::clone(&self.config),
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdvertLocation;
    use indexmap::IndexMap;

    fn config_with_groups(labels: &[&str]) -> Arc<AdvertConfig> {
        let advert_list = labels
            .iter()
            .map(|label| {
                let entries = IndexMap::from([(AdvertLocation::Chat, (*label).to_string())]);
                IndexMap::from([((*label).to_string(), entries)])
            })
            .collect();
        Arc::new(AdvertConfig {
            advert_list,
            ..AdvertConfig::empty()
        })
    }

    fn label(selection: &Selection) -> &str {
        selection.group().keys().next().unwrap()
    }

    #[test]
    fn test_round_robin_order() {
        let mut rotation = AdRotation::new(config_with_groups(&["a", "b", "c"]));

        let picked: Vec<String> = (0..7)
            .map(|_| label(&rotation.advance().unwrap()).to_string())
            .collect();

        assert_eq!(picked, vec!["a", "b", "c", "a", "b", "c", "a"]);
        assert_eq!(rotation.index(), 1);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut rotation = AdRotation::new(Arc::new(AdvertConfig::empty()));
        assert!(rotation.advance().is_none());
        assert!(rotation.advance().is_none());
        assert_eq!(rotation.index(), 0);
    }

    #[test]
    fn test_replace_resets_index() {
        let mut rotation = AdRotation::new(config_with_groups(&["a", "b", "c"]));
        rotation.advance();
        rotation.advance();
        assert_eq!(rotation.index(), 2);

        rotation.replace(config_with_groups(&["x", "y"]));
        assert_eq!(rotation.index(), 0);
        assert_eq!(label(&rotation.advance().unwrap()), "x");
    }

    #[test]
    fn test_selection_keeps_its_snapshot() {
        let mut rotation = AdRotation::new(config_with_groups(&["old"]));
        let selection = rotation.advance().unwrap();

        rotation.replace(config_with_groups(&["new"]));

        assert_eq!(label(&selection), "old");
        assert_eq!(label(&rotation.advance().unwrap()), "new");
    }

    #[test]
    fn test_single_group_repeats() {
        let mut rotation = AdRotation::new(config_with_groups(&["only"]));
        for _ in 0..3 {
            let selection = rotation.advance().unwrap();
            assert_eq!(selection.index(), 0);
        }
    }
}
