//! Advert broadcaster - the per-tick rotation and dispatch logic.
//!
//! One `AdvertBroadcaster` owns all mutable plugin state (active config,
//! rotation index, panel cache, audio cache) and is shared by `Arc` between
//! the timer, the config watcher and the round-end handler.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::{AdvertConfig, AdvertLocation};
use crate::panel::PanelCache;
use crate::paths::PluginPaths;
use crate::ports::{AudioError, Delivery, HostPorts};
use crate::render::{HostContext, render};
use crate::rotation::AdRotation;
use crate::services::round_end::RoundEndBridge;
use crate::services::sound::{SoundPlayback, SoundPlayer};

/// Summary of one tick, mostly for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the group that was shown, `None` for an empty rotation.
    pub group_index: Option<usize>,
    /// Entries rendered and handed to a sink.
    pub dispatched: usize,
    /// Entries skipped because they rendered blank.
    pub skipped: usize,
    /// Entries whose dispatch failed (sound errors).
    pub failed: usize,
}

/// Shared broadcaster state.
pub struct AdvertBroadcaster {
    rotation: Mutex<AdRotation>,
    panel: Arc<PanelCache>,
    sound: SoundPlayer,
    ports: HostPorts,
}

impl AdvertBroadcaster {
    pub fn new(config: Arc<AdvertConfig>, ports: HostPorts, paths: PluginPaths) -> Self {
        let sound = SoundPlayer::new(ports.audio.clone(), paths);
        Self {
            rotation: Mutex::new(AdRotation::new(config)),
            panel: Arc::new(PanelCache::new()),
            sound,
            ports,
        }
    }

    /// The snapshot currently in effect.
    pub fn config(&self) -> Arc<AdvertConfig> {
        Arc::clone(self.rotation.lock().config())
    }

    /// Index of the group the next tick will show.
    pub fn rotation_index(&self) -> usize {
        self.rotation.lock().index()
    }

    pub const fn panel(&self) -> &Arc<PanelCache> {
        &self.panel
    }

    pub const fn sound(&self) -> &SoundPlayer {
        &self.sound
    }

    /// Round-end handler reading this broadcaster's panel cache.
    pub fn round_end_bridge(&self) -> RoundEndBridge {
        RoundEndBridge::new(Arc::clone(&self.panel), Arc::clone(&self.ports.events))
    }

    /// Swap in a new configuration.
    ///
    /// Resets the rotation to the first group and drops decoded audio. The
    /// panel cache is left alone. A tick already running keeps the snapshot
    /// it selected from.
    pub fn apply_config(&self, config: Arc<AdvertConfig>) {
        let groups = config.advert_list.len();
        self.rotation.lock().replace(config);
        self.sound.clear_cache();
        info!(groups, "Advert configuration applied");
    }

    /// Show the next group in the rotation.
    pub fn tick(&self) -> TickReport {
        let Some(selection) = self.rotation.lock().advance() else {
            debug!("Advert list is empty; nothing to show");
            return TickReport::default();
        };

        let mut report = TickReport {
            group_index: Some(selection.index()),
            ..TickReport::default()
        };
        let config = selection.config();
        let ctx = HostContext::new(&self.ports);

        for (label, entries) in selection.group() {
            for (&location, raw) in entries {
                if raw.trim().is_empty() {
                    report.skipped += 1;
                    continue;
                }

                let message = render(raw, config, &ctx);
                if message.trim().is_empty() {
                    report.skipped += 1;
                    continue;
                }

                match self.dispatch(config, location, &message) {
                    Ok(()) => report.dispatched += 1,
                    Err(AudioError::NotFound(path)) => {
                        warn!(path = %path.display(), group = %label, "Audio file not found");
                        report.failed += 1;
                    }
                    Err(e) => {
                        error!(error = %e, group = %label, "Failed to play sound advert");
                        report.failed += 1;
                    }
                }
            }
        }

        debug!(
            group = selection.index(),
            dispatched = report.dispatched,
            skipped = report.skipped,
            failed = report.failed,
            "Advert tick complete"
        );
        report
    }

    fn dispatch(
        &self,
        config: &AdvertConfig,
        location: AdvertLocation,
        message: &str,
    ) -> Result<(), AudioError> {
        let delivery = match location {
            AdvertLocation::Panel => {
                self.panel.store(message);
                return Ok(());
            }
            AdvertLocation::Sound => {
                let players = self.ports.players.players();
                if self.sound.play(message, config.volume, &players)? == SoundPlayback::Unavailable
                {
                    debug!("Skipping sound advert; no audio subsystem");
                }
                return Ok(());
            }
            AdvertLocation::Chat => Delivery::Chat(message),
            AdvertLocation::Center => Delivery::Center(message),
            AdvertLocation::Alert => Delivery::Alert(message),
            AdvertLocation::Html => Delivery::CenterHtml {
                message,
                duration_ms: config.html_duration_ms(),
            },
        };

        for slot in self.ports.players.players() {
            if slot.is_valid {
                self.ports.players.send(slot.id, delivery);
            }
        }
        Ok(())
    }

    /// Release cached resources on unload.
    pub fn shutdown(&self) {
        self.sound.clear_cache();
        debug!("Advert broadcaster shut down");
    }
}
