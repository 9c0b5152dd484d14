//! Recording port implementations for tests.
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream integration tests. Every fake records what the broadcaster
//! asked of it, in call order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::events::WinPanelEvent;
use crate::ports::{
    AudioApi, AudioChannel, AudioError, AudioSource, ConsoleVars, Delivery, EngineInfo,
    GameEventBus, HOSTNAME_CVAR, HOSTPORT_CVAR, HostPorts, PlayerDirectory, PlayerId, PlayerSlot,
};

/// Which send primitive a recorded message went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Chat,
    Center,
    CenterHtml,
    Alert,
}

/// One recorded per-player send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub player: PlayerId,
    pub kind: DeliveryKind,
    pub message: String,
    pub duration_ms: Option<u32>,
}

/// Player directory that records every send.
#[derive(Debug, Default)]
pub struct RecordingPlayers {
    slots: Mutex<Vec<PlayerSlot>>,
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingPlayers {
    pub fn new(slots: Vec<PlayerSlot>) -> Self {
        Self {
            slots: Mutex::new(slots),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// `count` valid human players with ids `1..=count`.
    pub fn humans(count: i32) -> Self {
        Self::new((1..=count).map(PlayerSlot::human).collect())
    }

    pub fn set_players(&self, slots: Vec<PlayerSlot>) {
        *self.slots.lock() = slots;
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Drain the recorded sends.
    pub fn take_sent(&self) -> Vec<SentMessage> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl PlayerDirectory for RecordingPlayers {
    fn players(&self) -> Vec<PlayerSlot> {
        self.slots.lock().clone()
    }

    fn player_count(&self) -> usize {
        self.slots.lock().iter().filter(|slot| slot.is_valid).count()
    }

    fn send(&self, player: PlayerId, delivery: Delivery<'_>) {
        let (kind, duration_ms) = match delivery {
            Delivery::Chat(_) => (DeliveryKind::Chat, None),
            Delivery::Center(_) => (DeliveryKind::Center, None),
            Delivery::CenterHtml { duration_ms, .. } => (DeliveryKind::CenterHtml, Some(duration_ms)),
            Delivery::Alert(_) => (DeliveryKind::Alert, None),
        };
        self.sent.lock().push(SentMessage {
            player,
            kind,
            message: delivery.message().to_string(),
            duration_ms,
        });
    }
}

/// Playback channel that records its configuration and listeners.
#[derive(Debug)]
pub struct RecordingChannel {
    pub id: String,
    source: Mutex<Option<AudioSource>>,
    volume: Mutex<Option<f32>>,
    played: Mutex<Vec<PlayerId>>,
}

impl RecordingChannel {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            source: Mutex::new(None),
            volume: Mutex::new(None),
            played: Mutex::new(Vec::new()),
        }
    }

    pub fn source(&self) -> Option<AudioSource> {
        self.source.lock().clone()
    }

    pub fn volume(&self) -> Option<f32> {
        *self.volume.lock()
    }

    pub fn played(&self) -> Vec<PlayerId> {
        self.played.lock().clone()
    }
}

impl AudioChannel for RecordingChannel {
    fn set_source(&self, source: AudioSource) {
        *self.source.lock() = Some(source);
    }

    fn set_volume_to_all(&self, volume: f32) {
        *self.volume.lock() = Some(volume);
    }

    fn play(&self, player: PlayerId) {
        self.played.lock().push(player);
    }
}

/// Audio subsystem that decodes to the path itself and records channels.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    decodes: Mutex<Vec<PathBuf>>,
    failing: Mutex<HashSet<PathBuf>>,
    channels: Mutex<Vec<Arc<RecordingChannel>>>,
    decode_delay: Option<Duration>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every decode sleep, widening race windows in concurrency tests.
    #[must_use]
    pub fn with_decode_delay(mut self, delay: Duration) -> Self {
        self.decode_delay = Some(delay);
        self
    }

    /// Make decoding `path` fail until cleared.
    pub fn fail_decoding(&self, path: impl Into<PathBuf>) {
        self.failing.lock().insert(path.into());
    }

    pub fn stop_failing(&self) {
        self.failing.lock().clear();
    }

    /// Every decode call, in order.
    pub fn decodes(&self) -> Vec<PathBuf> {
        self.decodes.lock().clone()
    }

    pub fn channels(&self) -> Vec<Arc<RecordingChannel>> {
        self.channels.lock().clone()
    }
}

impl AudioApi for RecordingAudio {
    fn decode_from_file(&self, path: &Path) -> Result<AudioSource, AudioError> {
        if let Some(delay) = self.decode_delay {
            std::thread::sleep(delay);
        }
        self.decodes.lock().push(path.to_path_buf());

        if self.failing.lock().contains(path) {
            return Err(AudioError::Decode {
                path: path.to_path_buf(),
                message: "unsupported format".to_string(),
            });
        }
        Ok(AudioSource::new(path.to_path_buf()))
    }

    fn use_channel(&self, channel_id: &str) -> Arc<dyn AudioChannel> {
        let mut channels = self.channels.lock();
        if let Some(existing) = channels.iter().find(|c| c.id == channel_id) {
            return existing.clone();
        }
        let channel = Arc::new(RecordingChannel::new(channel_id));
        channels.push(Arc::clone(&channel));
        channel
    }
}

/// Game-event bus that records fired win panels.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    fired: Mutex<Vec<WinPanelEvent>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> Vec<WinPanelEvent> {
        self.fired.lock().clone()
    }
}

impl GameEventBus for RecordingEvents {
    fn fire_win_panel(&self, event: WinPanelEvent) {
        self.fired.lock().push(event);
    }
}

/// Fixed console variables and engine facts.
#[derive(Debug)]
pub struct FixedServer {
    pub ip: String,
    pub port: Option<i64>,
    pub hostname: Option<String>,
    map: Mutex<String>,
}

impl FixedServer {
    pub fn new(map: &str) -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: Some(27015),
            hostname: Some("Test Server".to_string()),
            map: Mutex::new(map.to_string()),
        }
    }

    pub fn change_map(&self, map: &str) {
        *self.map.lock() = map.to_string();
    }
}

impl ConsoleVars for FixedServer {
    fn find_int(&self, name: &str) -> Option<i64> {
        (name == HOSTPORT_CVAR).then_some(self.port).flatten()
    }

    fn find_string(&self, name: &str) -> Option<String> {
        if name == HOSTNAME_CVAR {
            self.hostname.clone()
        } else {
            None
        }
    }
}

impl EngineInfo for FixedServer {
    fn server_ip(&self) -> String {
        self.ip.clone()
    }

    fn map_name(&self) -> String {
        self.map.lock().clone()
    }
}

/// Handles to every fake behind a [`HostPorts`].
pub struct TestHost {
    pub players: Arc<RecordingPlayers>,
    pub audio: Arc<RecordingAudio>,
    pub events: Arc<RecordingEvents>,
    pub server: Arc<FixedServer>,
}

impl TestHost {
    /// A host with `humans` players on `de_dust2` and an audio subsystem.
    pub fn new(humans: i32) -> Self {
        Self {
            players: Arc::new(RecordingPlayers::humans(humans)),
            audio: Arc::new(RecordingAudio::new()),
            events: Arc::new(RecordingEvents::new()),
            server: Arc::new(FixedServer::new("de_dust2")),
        }
    }

    /// Ports wired to the fakes, with audio.
    pub fn ports(&self) -> HostPorts {
        self.ports_without_audio().with_audio(self.audio.clone())
    }

    /// Ports wired to the fakes, audio subsystem absent.
    pub fn ports_without_audio(&self) -> HostPorts {
        HostPorts::new(
            self.players.clone(),
            self.server.clone(),
            self.server.clone(),
            self.events.clone(),
        )
    }
}
