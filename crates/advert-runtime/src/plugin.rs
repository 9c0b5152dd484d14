//! Plugin lifecycle: load, round-end forwarding and unload.
//!
//! The host calls [`AdvertPlugin::load`] once with its ports and directories,
//! forwards every round end to [`AdvertPlugin::on_round_end`] and calls
//! [`AdvertPlugin::unload`] on shutdown. A failed load leaves the plugin
//! disabled; every later entry point is then a no-op.

use std::sync::Arc;

use advert_core::ports::ConfigProvider;
use advert_core::{
    AdvertBroadcaster, HostPorts, PluginPaths, RoundEnd, RoundEndBridge, WinPanelEvent,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config_file::JsoncConfigProvider;
use crate::config_watcher::spawn_config_watcher;
use crate::error::PluginError;
use crate::file_watcher::ConfigFileWatcher;
use crate::scheduler::Scheduler;

/// Load-time options.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    pub paths: PluginPaths,
    /// Hot-reload `config.jsonc` when it changes on disk.
    pub watch_config: bool,
}

impl PluginOptions {
    pub const fn new(paths: PluginPaths) -> Self {
        Self {
            paths,
            watch_config: true,
        }
    }

    #[must_use]
    pub const fn without_file_watch(mut self) -> Self {
        self.watch_config = false;
        self
    }
}

/// Lifecycle state reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginState {
    Running,
    Disabled { reason: String },
    Unloaded,
}

struct Running {
    broadcaster: Arc<AdvertBroadcaster>,
    bridge: RoundEndBridge,
    scheduler: Arc<Scheduler>,
    provider: Arc<JsoncConfigProvider>,
    cancel_token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// The advert plugin as seen by the host.
pub struct AdvertPlugin {
    state: PluginState,
    running: Option<Running>,
}

impl AdvertPlugin {
    /// Load configuration, start the timer and the reload tasks.
    ///
    /// Must be called from within a tokio runtime. Never fails: problems are
    /// logged and reported through [`state`](Self::state).
    pub fn load(ports: HostPorts, options: PluginOptions) -> Self {
        match Self::start(ports, &options) {
            Ok(running) => {
                info!(
                    groups = running.broadcaster.config().advert_list.len(),
                    config = %running.provider.path().display(),
                    "Advert plugin loaded"
                );
                Self {
                    state: PluginState::Running,
                    running: Some(running),
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to load advert plugin; plugin disabled");
                Self {
                    state: PluginState::Disabled {
                        reason: e.to_string(),
                    },
                    running: None,
                }
            }
        }
    }

    fn start(ports: HostPorts, options: &PluginOptions) -> Result<Running, PluginError> {
        let provider = Arc::new(JsoncConfigProvider::open(options.paths.config_file())?);
        let config = provider.current();
        let period = config.period()?;

        let broadcaster = Arc::new(AdvertBroadcaster::new(
            config,
            ports,
            options.paths.clone(),
        ));

        let tick_target = Arc::clone(&broadcaster);
        let scheduler = Arc::new(Scheduler::new(Arc::new(move || {
            tick_target.tick();
        })));
        scheduler.start(period)?;

        let file_watcher = if options.watch_config {
            Some(ConfigFileWatcher::new(provider.path())?)
        } else {
            None
        };

        let cancel_token = CancellationToken::new();
        let mut tasks = vec![spawn_config_watcher(
            provider.subscribe(),
            Arc::clone(&broadcaster),
            Arc::clone(&scheduler),
            cancel_token.child_token(),
        )];
        if let Some(watcher) = file_watcher {
            tasks.push(watcher.spawn(Arc::clone(&provider), cancel_token.child_token()));
        }

        Ok(Running {
            bridge: broadcaster.round_end_bridge(),
            broadcaster,
            scheduler,
            provider,
            cancel_token,
            tasks,
        })
    }

    pub const fn state(&self) -> &PluginState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PluginState::Running
    }

    /// Shared broadcaster state, while running.
    pub fn broadcaster(&self) -> Option<&Arc<AdvertBroadcaster>> {
        self.running.as_ref().map(|running| &running.broadcaster)
    }

    /// Round-end hook. Fires the win panel when a panel advert is cached.
    pub fn on_round_end(&self, event: RoundEnd) -> Option<WinPanelEvent> {
        self.running.as_ref()?.bridge.on_round_end(event)
    }

    /// Re-read `config.jsonc` now instead of waiting for the file watcher.
    ///
    /// A published change is applied by the config watcher task.
    pub fn reload_config(&self) -> Result<bool, PluginError> {
        let running = self.running.as_ref().ok_or(PluginError::NotRunning)?;
        Ok(running.provider.reload()?)
    }

    /// Stop the timer and reload tasks and drop cached audio.
    pub fn unload(&mut self) {
        drop(self.stop());
    }

    /// Unload and wait for the background tasks to exit.
    pub async fn shutdown(&mut self) {
        for task in self.stop() {
            if let Err(e) = task.await {
                warn!(error = %e, "Advert task ended abnormally");
            }
        }
    }

    fn stop(&mut self) -> Vec<JoinHandle<()>> {
        let Some(running) = self.running.take() else {
            return Vec::new();
        };

        running.scheduler.cancel();
        running.cancel_token.cancel();
        running.broadcaster.shutdown();

        self.state = PluginState::Unloaded;
        info!("Advert plugin unloaded");
        running.tasks
    }
}

impl Drop for AdvertPlugin {
    fn drop(&mut self) {
        self.unload();
    }
}
