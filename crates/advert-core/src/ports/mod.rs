//! Port definitions (trait abstractions) for host-provided systems.
//!
//! Ports define the interfaces that the broadcaster expects from the plugin
//! host. They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No host SDK types in any signature
//! - Fire-and-forget sinks do not return `Result`; failures stay in the host
//! - The audio subsystem is optional and callers hold it as an `Option`

pub mod audio;
pub mod config_provider;
pub mod game_events;
pub mod players;
pub mod server;

use std::sync::Arc;

pub use audio::{AudioApi, AudioChannel, AudioError, AudioSource};
pub use config_provider::{ConfigProvider, StaticConfigProvider};
pub use game_events::{GameEventBus, NoopGameEventBus};
pub use players::{Delivery, PlayerDirectory, PlayerId, PlayerSlot};
pub use server::{ConsoleVars, EngineInfo, HOSTNAME_CVAR, HOSTPORT_CVAR};

/// Container for all host port trait objects.
///
/// This struct provides a consistent way to wire the host into the
/// broadcaster without coupling it to concrete implementations.
///
/// # Example
///
/// ```ignore
/// let ports = HostPorts::new(players, console, engine, events)
///     .with_audio(audio_api);
/// let broadcaster = AdvertBroadcaster::new(config, ports, paths);
/// ```
#[derive(Clone)]
pub struct HostPorts {
    /// Player enumeration and send primitives.
    pub players: Arc<dyn PlayerDirectory>,
    /// Console variable lookups.
    pub console: Arc<dyn ConsoleVars>,
    /// Engine facts (IP, current map).
    pub engine: Arc<dyn EngineInfo>,
    /// Game-event bus used for the win panel.
    pub events: Arc<dyn GameEventBus>,
    /// Audio subsystem, absent when the host has none installed.
    pub audio: Option<Arc<dyn AudioApi>>,
}

impl HostPorts {
    /// Create a port container without an audio subsystem.
    pub fn new(
        players: Arc<dyn PlayerDirectory>,
        console: Arc<dyn ConsoleVars>,
        engine: Arc<dyn EngineInfo>,
        events: Arc<dyn GameEventBus>,
    ) -> Self {
        Self {
            players,
            console,
            engine,
            events,
            audio: None,
        }
    }

    /// Attach the audio subsystem.
    #[must_use]
    pub fn with_audio(mut self, audio: Arc<dyn AudioApi>) -> Self {
        self.audio = Some(audio);
        self
    }
}

