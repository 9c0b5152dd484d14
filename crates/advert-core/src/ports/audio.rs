//! Audio subsystem port.
//!
//! The audio subsystem is optional: a host without it is a valid runtime
//! state, modelled as `Option<Arc<dyn AudioApi>>` by the callers.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::PlayerId;

/// Opaque handle to a decoded audio source.
///
/// Cheap to clone; the host decides what lives inside.
#[derive(Clone)]
pub struct AudioSource(Arc<dyn Any + Send + Sync>);

impl AudioSource {
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Borrow the host-specific payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same decoded source.
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioSource").finish_non_exhaustive()
    }
}

/// Errors raised while preparing a sound advert.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// The resolved file does not exist.
    #[error("Audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The audio subsystem failed to decode the file.
    #[error("Failed to decode sound file {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
}

/// Named playback channel.
pub trait AudioChannel: Send + Sync {
    fn set_source(&self, source: AudioSource);

    /// Set volume for every listener attached to the channel.
    fn set_volume_to_all(&self, volume: f32);

    /// Start playback for a single player.
    fn play(&self, player: PlayerId);
}

/// Port for the host audio subsystem.
pub trait AudioApi: Send + Sync {
    /// Decode a file into a reusable source handle.
    fn decode_from_file(&self, path: &Path) -> Result<AudioSource, AudioError>;

    /// Create or fetch a playback channel by id.
    fn use_channel(&self, channel_id: &str) -> Arc<dyn AudioChannel>;
}
