//! Runtime error types.

use advert_core::ConfigError;
use thiserror::Error;

use crate::scheduler::SchedulerError;

/// Errors that keep the plugin from loading or reloading.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Failed to watch config file: {0}")]
    Watch(#[from] notify::Error),

    /// Entry point called on a plugin that is not running.
    #[error("Advert plugin is not running")]
    NotRunning,
}
