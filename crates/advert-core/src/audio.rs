//! Decoded audio cache and playback channel ids.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::ports::{AudioError, AudioSource};

/// Prefix of every playback channel id.
pub const CHANNEL_PREFIX: &str = "advert";

/// Decoded sources keyed by resolved absolute path.
///
/// The first caller for a path decodes while holding the entry; concurrent
/// callers for the same path wait and reuse the result. Failed decodes are
/// not cached, so the next dispatch retries.
#[derive(Debug, Default)]
pub struct AudioCache {
    sources: DashMap<PathBuf, AudioSource>,
}

impl AudioCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached source for `path`, decoding it on first use.
    ///
    /// `decode` must not touch this cache.
    pub fn get_or_decode<F>(&self, path: &Path, decode: F) -> Result<AudioSource, AudioError>
    where
        F: FnOnce(&Path) -> Result<AudioSource, AudioError>,
    {
        if let Some(source) = self.sources.get(path) {
            return Ok(source.clone());
        }

        match self.sources.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let source = decode(path)?;
                entry.insert(source.clone());
                Ok(source)
            }
        }
    }

    /// Drop every cached source.
    pub fn clear(&self) {
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.sources.contains_key(path)
    }
}

/// Generator for unique playback channel ids (`advert.<n>`).
///
/// Wraps on overflow; ids only need to be unique over a short window.
#[derive(Debug, Default)]
pub struct ChannelCounter {
    next: AtomicU64,
}

impl ChannelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        format!("{CHANNEL_PREFIX}.{n}")
    }
}
