//! `config.jsonc` loading and the file-backed config provider.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use advert_core::ports::ConfigProvider;
use advert_core::{AdvertConfig, ConfigError, validate_config};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::jsonc::strip_jsonc;

/// Section key the settings may be nested under.
pub const CONFIG_SECTION: &str = "ConfigModel";

const DEFAULT_CONFIG_HEADER: &str = "// Advert plugin configuration. Comments and trailing commas are allowed.\n";

/// Parse and validate configuration text.
///
/// Accepts either the bare settings object or one wrapped under
/// [`CONFIG_SECTION`]. Missing keys take their defaults.
pub fn parse_config(text: &str) -> Result<AdvertConfig, ConfigError> {
    let mut root: Value =
        serde_json::from_str(&strip_jsonc(text)).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let section = match root.get_mut(CONFIG_SECTION) {
        Some(section) => section.take(),
        None => root,
    };
    let config: AdvertConfig =
        serde_json::from_value(section).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Read, parse and validate a config file.
pub fn read_config(path: &Path) -> Result<AdvertConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
    parse_config(&text)
}

/// Write the default configuration to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<AdvertConfig, ConfigError> {
    let config = AdvertConfig::default();
    let section = serde_json::to_value(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let mut wrapped = serde_json::Map::new();
    wrapped.insert(CONFIG_SECTION.to_string(), section);
    let body =
        serde_json::to_string_pretty(&wrapped).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
    }
    fs::write(path, format!("{DEFAULT_CONFIG_HEADER}{body}\n")).map_err(|e| io_error(path, &e))?;

    info!(path = %path.display(), "Created default advert config");
    Ok(config)
}

/// Read `path`, creating it from defaults first when it does not exist.
pub fn load_or_create(path: &Path) -> Result<AdvertConfig, ConfigError> {
    if path.exists() {
        read_config(path)
    } else {
        write_default_config(path)
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Config provider backed by a JSONC file.
///
/// [`reload`](Self::reload) re-reads the file and publishes the new snapshot
/// to subscribers. An unreadable or invalid file leaves the current snapshot
/// in place.
pub struct JsoncConfigProvider {
    path: PathBuf,
    sender: watch::Sender<Arc<AdvertConfig>>,
}

impl JsoncConfigProvider {
    /// Load the file at `path`, writing defaults when it is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = load_or_create(&path)?;
        let (sender, _) = watch::channel(Arc::new(config));
        Ok(Self { path, sender })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file.
    ///
    /// Returns whether a new snapshot was published; an unchanged file
    /// publishes nothing.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let config = read_config(&self.path)?;

        let published = self.sender.send_if_modified(|current| {
            if **current == config {
                false
            } else {
                *current = Arc::new(config);
                true
            }
        });

        if published {
            debug!(path = %self.path.display(), "Published reloaded advert config");
        }
        Ok(published)
    }
}

impl ConfigProvider for JsoncConfigProvider {
    fn current(&self) -> Arc<AdvertConfig> {
        Arc::clone(&self.sender.borrow())
    }

    fn subscribe(&self) -> watch::Receiver<Arc<AdvertConfig>> {
        self.sender.subscribe()
    }
}
