#![deny(unsafe_code)]
//! Runtime side of the advert plugin.
//!
//! Drives an `advert_core::AdvertBroadcaster` from a tokio timer, loads
//! `config.jsonc` and hot-reloads it, and exposes the host-facing
//! [`AdvertPlugin`] lifecycle.

pub mod config_file;
pub mod config_watcher;
mod error;
pub mod file_watcher;
mod jsonc;
pub mod plugin;
pub mod scheduler;

pub use config_file::{
    CONFIG_SECTION, JsoncConfigProvider, load_or_create, parse_config, read_config,
    write_default_config,
};
pub use config_watcher::{apply_snapshot, spawn_config_watcher};
pub use error::PluginError;
pub use file_watcher::ConfigFileWatcher;
pub use jsonc::strip_jsonc;
pub use plugin::{AdvertPlugin, PluginOptions, PluginState};
pub use scheduler::{RepeatingTask, Scheduler, SchedulerError, TickFn};
