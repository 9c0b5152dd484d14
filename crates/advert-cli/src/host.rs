//! Console host: port implementations that log instead of talking to a game.
//!
//! Every delivery is emitted as a `tracing` event on the `advert::host`
//! target, with control codes escaped so colored messages stay readable.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use advert_core::ports::{
    AudioApi, AudioChannel, AudioError, AudioSource, ConsoleVars, Delivery, EngineInfo,
    GameEventBus, HOSTNAME_CVAR, HOSTPORT_CVAR, HostPorts, PlayerDirectory, PlayerId, PlayerSlot,
};
use advert_core::WinPanelEvent;
use tracing::info;

use crate::presentation::escape_control;

/// Simulated player list.
pub struct ConsolePlayers {
    slots: Vec<PlayerSlot>,
}

impl ConsolePlayers {
    /// `humans` players followed by `bots` bots, ids starting at 1.
    pub fn new(humans: u16, bots: u16) -> Self {
        let humans = i32::from(humans);
        let bots = i32::from(bots);
        let slots = (1..=humans)
            .map(PlayerSlot::human)
            .chain((humans + 1..=humans + bots).map(PlayerSlot::bot))
            .collect();
        Self { slots }
    }
}

impl PlayerDirectory for ConsolePlayers {
    fn players(&self) -> Vec<PlayerSlot> {
        self.slots.clone()
    }

    fn player_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_valid).count()
    }

    fn send(&self, player: PlayerId, delivery: Delivery<'_>) {
        let message = escape_control(delivery.message());
        match delivery {
            Delivery::Chat(_) => info!(target: "advert::host", %player, %message, "chat"),
            Delivery::Center(_) => info!(target: "advert::host", %player, %message, "center"),
            Delivery::CenterHtml { duration_ms, .. } => {
                info!(target: "advert::host", %player, duration_ms, %message, "center html");
            }
            Delivery::Alert(_) => info!(target: "advert::host", %player, %message, "alert"),
        }
    }
}

/// Console variables and engine facts of the simulated server.
pub struct ConsoleServer {
    ip: String,
    port: i64,
    hostname: String,
    map: String,
}

impl ConsoleServer {
    pub fn new(map: &str, hostname: &str) -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 27015,
            hostname: hostname.to_string(),
            map: map.to_string(),
        }
    }
}

impl ConsoleVars for ConsoleServer {
    fn find_int(&self, name: &str) -> Option<i64> {
        (name == HOSTPORT_CVAR).then_some(self.port)
    }

    fn find_string(&self, name: &str) -> Option<String> {
        (name == HOSTNAME_CVAR).then(|| self.hostname.clone())
    }
}

impl EngineInfo for ConsoleServer {
    fn server_ip(&self) -> String {
        self.ip.clone()
    }

    fn map_name(&self) -> String {
        self.map.clone()
    }
}

/// Logs win panels.
pub struct ConsoleEvents;

impl GameEventBus for ConsoleEvents {
    fn fire_win_panel(&self, event: WinPanelEvent) {
        info!(
            target: "advert::host",
            final_event = event.final_event,
            message = %escape_control(&event.funfact_token),
            "win panel"
        );
    }
}

/// "Decodes" by reading the whole file; playback is logged.
pub struct ConsoleAudio;

impl AudioApi for ConsoleAudio {
    fn decode_from_file(&self, path: &Path) -> Result<AudioSource, AudioError> {
        let bytes = fs::read(path).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(target: "advert::host", path = %path.display(), bytes = bytes.len(), "decoded sound");
        Ok(AudioSource::new(bytes))
    }

    fn use_channel(&self, channel_id: &str) -> Arc<dyn AudioChannel> {
        Arc::new(ConsoleChannel {
            id: channel_id.to_string(),
        })
    }
}

struct ConsoleChannel {
    id: String,
}

impl AudioChannel for ConsoleChannel {
    fn set_source(&self, source: AudioSource) {
        let bytes = source.downcast_ref::<Vec<u8>>().map_or(0, Vec::len);
        info!(target: "advert::host", channel = %self.id, bytes, "channel source set");
    }

    fn set_volume_to_all(&self, volume: f32) {
        info!(target: "advert::host", channel = %self.id, volume, "channel volume set");
    }

    fn play(&self, player: PlayerId) {
        info!(target: "advert::host", channel = %self.id, %player, "sound");
    }
}

/// Build the console host's ports.
pub fn console_ports(players: ConsolePlayers, server: ConsoleServer) -> HostPorts {
    let server = Arc::new(server);
    HostPorts::new(
        Arc::new(players),
        server.clone(),
        server,
        Arc::new(ConsoleEvents),
    )
    .with_audio(Arc::new(ConsoleAudio))
}
