//! Plugin directory layout and file resolution.
//!
//! The host gives the plugin two roots:
//! - the data directory (user-editable config and media)
//! - the install directory (files shipped with the plugin)
//!
//! # Design
//!
//! - Existence checks and joins only; reading files is the caller's concern
//! - Relative paths prefer the data directory and fall back to the install
//!   directory

use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.jsonc";

/// Root directories the host assigns to the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    /// Per-server data directory (config, user media).
    pub data_dir: PathBuf,
    /// Directory the plugin was installed into.
    pub install_dir: PathBuf,
}

impl PluginPaths {
    pub fn new(data_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Location of the configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Resolve a configured file path.
    ///
    /// Absolute paths are returned as-is. Relative paths resolve against the
    /// data directory when that file exists, otherwise against the install
    /// directory. The result is not guaranteed to exist.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let configured = Path::new(configured);
        if configured.is_absolute() {
            return configured.to_path_buf();
        }

        let data_candidate = self.data_dir.join(configured);
        if data_candidate.exists() {
            data_candidate
        } else {
            self.install_dir.join(configured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn resolve_prefers_data_dir() {
        let data = tempdir().unwrap();
        let install = tempdir().unwrap();
        File::create(data.path().join("jingle.mp3")).unwrap();
        File::create(install.path().join("jingle.mp3")).unwrap();

        let paths = PluginPaths::new(data.path(), install.path());
        assert_eq!(paths.resolve("jingle.mp3"), data.path().join("jingle.mp3"));
    }

    #[test]
    fn resolve_falls_back_to_install_dir() {
        let data = tempdir().unwrap();
        let install = tempdir().unwrap();

        let paths = PluginPaths::new(data.path(), install.path());
        assert_eq!(
            paths.resolve("sounds/jingle.mp3"),
            install.path().join("sounds/jingle.mp3")
        );
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let data = tempdir().unwrap();
        let absolute = data.path().join("elsewhere.wav");

        let paths = PluginPaths::new("/unused/data", "/unused/install");
        assert_eq!(paths.resolve(absolute.to_str().unwrap()), absolute);
    }

    #[test]
    fn config_file_lives_in_data_dir() {
        let paths = PluginPaths::new("/srv/plugins/advert", "/opt/advert");
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/srv/plugins/advert/config.jsonc")
        );
    }
}
