//! Sound advert playback.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::audio::{AudioCache, ChannelCounter};
use crate::paths::PluginPaths;
use crate::ports::{AudioApi, AudioError, PlayerSlot};

/// Result of a sound dispatch that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundPlayback {
    /// Played on a fresh channel for `listeners` human players.
    Played { channel_id: String, listeners: usize },
    /// No audio subsystem is installed; nothing happened.
    Unavailable,
}

/// Resolves, decodes (once per path) and plays sound adverts.
pub struct SoundPlayer {
    api: Option<Arc<dyn AudioApi>>,
    cache: AudioCache,
    channels: ChannelCounter,
    paths: PluginPaths,
}

impl SoundPlayer {
    /// Create a player. An absent audio subsystem is reported once, here.
    pub fn new(api: Option<Arc<dyn AudioApi>>, paths: PluginPaths) -> Self {
        if api.is_none() {
            warn!("Audio subsystem not found; sound adverts are disabled");
        }

        Self {
            api,
            cache: AudioCache::new(),
            channels: ChannelCounter::new(),
            paths,
        }
    }

    pub const fn is_available(&self) -> bool {
        self.api.is_some()
    }

    pub const fn cache(&self) -> &AudioCache {
        &self.cache
    }

    /// Play `sound_path` for every valid human in `players`.
    pub fn play(
        &self,
        sound_path: &str,
        volume: f32,
        players: &[PlayerSlot],
    ) -> Result<SoundPlayback, AudioError> {
        let Some(api) = self.api.as_deref() else {
            return Ok(SoundPlayback::Unavailable);
        };

        let resolved = self.paths.resolve(sound_path.trim());
        if !resolved.exists() {
            return Err(AudioError::NotFound(resolved));
        }

        let source = self
            .cache
            .get_or_decode(&resolved, |path| api.decode_from_file(path))?;

        let channel_id = self.channels.next_id();
        let channel = api.use_channel(&channel_id);
        channel.set_source(source);
        channel.set_volume_to_all(volume);

        let mut listeners = 0;
        for slot in players.iter().filter(|slot| slot.is_human()) {
            channel.play(slot.id);
            listeners += 1;
        }

        debug!(
            channel = %channel_id,
            path = %resolved.display(),
            listeners,
            "Sound advert played"
        );

        Ok(SoundPlayback::Played {
            channel_id,
            listeners,
        })
    }

    /// Drop every decoded source.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
