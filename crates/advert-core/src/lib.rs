#![deny(unused_crate_dependencies)]
//! Core of the advert broadcaster plugin.
//!
//! Holds the configuration model, the template renderer, the rotation and
//! dispatch services and the port traits a game-server host implements.
//! Timers, file watching and the plugin lifecycle live in `advert-runtime`.

pub mod audio;
pub mod config;
pub mod events;
pub mod panel;
pub mod paths;
pub mod ports;
pub mod render;
pub mod rotation;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{
    AdGroup, AdvertConfig, AdvertEntries, AdvertLocation, ConfigError, DEFAULT_HTML_DURATION_SECS,
    DEFAULT_INTERVAL_SECS, DEFAULT_VOLUME, MIN_INTERVAL_SECS, validate_config,
};
pub use events::{RoundEnd, RoundOutcome, Team, WinPanelEvent};
pub use panel::PanelCache;
pub use paths::{CONFIG_FILE_NAME, PluginPaths};
pub use ports::{
    AudioApi, AudioChannel, AudioError, AudioSource, ConfigProvider, ConsoleVars,
    Delivery, EngineInfo, GameEventBus, HostPorts, NoopGameEventBus, PlayerDirectory, PlayerId,
    PlayerSlot, StaticConfigProvider,
};
pub use render::{HostContext, StaticContext, TemplateContext, render};
pub use rotation::{AdRotation, Selection};
pub use services::{AdvertBroadcaster, RoundEndBridge, SoundPlayback, SoundPlayer, TickReport};
