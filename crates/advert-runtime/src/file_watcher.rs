//! Filesystem watcher that hot-reloads `config.jsonc`.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config_file::JsoncConfigProvider;

/// Quiet time after the first change event before the file is re-read.
/// Editors often write a file in several steps.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the config file's directory and reloads the provider on change.
pub struct ConfigFileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl ConfigFileWatcher {
    /// Start watching the directory that holds `config_path`.
    pub fn new(config_path: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel(64);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                // A full queue already guarantees a pending reload.
                let _ = tx.try_send(res);
            },
            Config::default(),
        )?;

        let dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            file_name: config_path.file_name().unwrap_or_default().to_os_string(),
        })
    }

    /// Wait for the next change to the config file.
    ///
    /// Returns `false` once the watcher has shut down.
    pub async fn changed(&mut self) -> bool {
        while let Some(result) = self.rx.recv().await {
            match result {
                Ok(event) if self.is_config_change(&event) => {
                    sleep(RELOAD_DEBOUNCE).await;
                    while self.rx.try_recv().is_ok() {}
                    return true;
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Config watcher error"),
            }
        }
        false
    }

    fn is_config_change(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|path| path.file_name() == Some(self.file_name.as_os_str()))
    }

    /// Drive reloads of `provider` until `cancel_token` fires.
    pub fn spawn(
        mut self,
        provider: Arc<JsoncConfigProvider>,
        cancel_token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            debug!(path = %provider.path().display(), "Watching advert config");

            loop {
                tokio::select! {
                    () = cancel_token.cancelled() => break,
                    changed = self.changed() => {
                        if !changed {
                            break;
                        }
                        match provider.reload() {
                            Ok(true) => info!("Advert config file changed; reloading"),
                            Ok(false) => debug!("Advert config file touched without changes"),
                            Err(e) => warn!(
                                error = %e,
                                "Rejected advert config reload; keeping previous configuration"
                            ),
                        }
                    }
                }
            }

            debug!("Advert config watcher stopped");
        })
    }
}
