//! Advert configuration domain types and validation.
//!
//! This module contains the configuration snapshot consumed by the broadcaster.
//! These are pure domain types with no infrastructure dependencies; loading and
//! hot reload live in the runtime crate.

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default repeat period between ad ticks, in seconds.
pub const DEFAULT_INTERVAL_SECS: f32 = 15.0;

/// Shortest accepted repeat period, in seconds.
pub const MIN_INTERVAL_SECS: f32 = 1.0;

/// Default lifetime of a center HTML message, in seconds.
pub const DEFAULT_HTML_DURATION_SECS: i32 = 5;

/// Default playback volume for sound adverts.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Delivery channel of a single advert message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvertLocation {
    Chat,
    Center,
    Alert,
    Html,
    Panel,
    Sound,
}

impl AdvertLocation {
    /// All locations, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Chat,
        Self::Center,
        Self::Alert,
        Self::Html,
        Self::Panel,
        Self::Sound,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Center => "Center",
            Self::Alert => "Alert",
            Self::Html => "Html",
            Self::Panel => "Panel",
            Self::Sound => "Sound",
        }
    }
}

impl std::fmt::Display for AdvertLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages of one labeled sub-group, keyed by location in insertion order.
pub type AdvertEntries = IndexMap<AdvertLocation, String>;

/// One rotation unit: group label → entries.
///
/// Labels only group entries together; every entry of every label is emitted
/// on the tick that selects the group.
pub type AdGroup = IndexMap<String, AdvertEntries>;

/// Immutable configuration snapshot.
///
/// Replaced wholesale on every reload; never mutated once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AdvertConfig {
    /// Repeat period between ticks, in seconds.
    pub interval: f32,

    /// Center HTML message lifetime, in seconds.
    pub html_duration: i32,

    /// Sound advert playback volume (0.0 - 1.0).
    pub volume: f32,

    /// Canonical map id → display name used by `{MAP}`.
    pub maps_name: IndexMap<String, String>,

    /// Ordered rotation of ad groups.
    pub advert_list: Vec<AdGroup>,
}

impl Default for AdvertConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL_SECS,
            html_duration: DEFAULT_HTML_DURATION_SECS,
            volume: DEFAULT_VOLUME,
            maps_name: default_maps_name(),
            advert_list: default_advert_list(),
        }
    }
}

impl AdvertConfig {
    /// An otherwise-default config with an empty rotation.
    pub fn empty() -> Self {
        Self {
            advert_list: Vec::new(),
            ..Self::default()
        }
    }

    /// Tick period as a `Duration`. Intervals below [`MIN_INTERVAL_SECS`]
    /// are rejected.
    pub fn period(&self) -> Result<Duration, ConfigError> {
        if !self.interval.is_finite() || self.interval < MIN_INTERVAL_SECS {
            return Err(ConfigError::InvalidInterval(self.interval));
        }
        Duration::try_from_secs_f32(self.interval)
            .map_err(|_| ConfigError::InvalidInterval(self.interval))
    }

    /// Center HTML duration in the host API's millisecond unit.
    pub fn html_duration_ms(&self) -> u32 {
        u32::try_from(self.html_duration)
            .unwrap_or(0)
            .saturating_mul(1000)
    }

    /// Display name for a map id, falling back to the id itself.
    pub fn map_display_name<'a>(&'a self, map_id: &'a str) -> &'a str {
        self.maps_name.get(map_id).map_or(map_id, String::as_str)
    }
}

fn default_maps_name() -> IndexMap<String, String> {
    [
        ("de_dust2", "Dust II"),
        ("de_mirage", "Mirage"),
        ("awp_lego_2", "AWP Lego 2"),
        ("de_inferno", "Inferno"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

fn group(label: &str, entries: &[(AdvertLocation, &str)]) -> AdGroup {
    let entries = entries
        .iter()
        .map(|(location, message)| (*location, (*message).to_string()))
        .collect();
    IndexMap::from([(label.to_string(), entries)])
}

fn default_advert_list() -> Vec<AdGroup> {
    use AdvertLocation::{Alert, Center, Chat, Html, Panel, Sound};

    vec![
        group("test1", &[(Chat, "test in chat")]),
        group("test2", &[(Center, "test in center")]),
        group("test3", &[(Alert, "test in alert")]),
        group(
            "test4",
            &[(
                Html,
                "<b><font color='lime'>test in</font> <font color='white'>html</font></b>",
            )],
        ),
        group(
            "test5",
            &[(
                Panel,
                "<b><font color='lime'>test in</font> <font color='white'>panel</font></b>",
            )],
        ),
        group("test6", &[(Alert, "test in alert"), (Chat, "and in chat")]),
        group("test7", &[(Sound, "test_in_audio.mp3")]),
    ]
}

/// Configuration loading and validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Interval must be at least {MIN_INTERVAL_SECS} second(s), got {0}")]
    InvalidInterval(f32),

    #[error("HtmlDuration must not be negative, got {0}")]
    InvalidHtmlDuration(i32),

    #[error("Volume must be between 0.0 and 1.0, got {0}")]
    InvalidVolume(f32),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to access config file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

/// Validate configuration values.
pub fn validate_config(config: &AdvertConfig) -> Result<(), ConfigError> {
    config.period()?;

    if config.html_duration < 0 {
        return Err(ConfigError::InvalidHtmlDuration(config.html_duration));
    }

    if !(0.0..=1.0).contains(&config.volume) {
        return Err(ConfigError::InvalidVolume(config.volume));
    }

    Ok(())
}
