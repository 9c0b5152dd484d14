//! Player directory port.
//!
//! The host owns the player list and the per-player send primitives; the
//! broadcaster only enumerates slots and asks the directory to deliver.

use std::fmt;

/// Stable per-session player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of one known player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    pub id: PlayerId,
    /// Whether the host considers the slot a valid, connected player.
    pub is_valid: bool,
    /// Fake client (bot) flag.
    pub is_bot: bool,
}

impl PlayerSlot {
    pub const fn human(id: i32) -> Self {
        Self {
            id: PlayerId(id),
            is_valid: true,
            is_bot: false,
        }
    }

    pub const fn bot(id: i32) -> Self {
        Self {
            id: PlayerId(id),
            is_valid: true,
            is_bot: true,
        }
    }

    /// Valid and not a bot.
    pub const fn is_human(&self) -> bool {
        self.is_valid && !self.is_bot
    }
}

/// A message addressed to a single player through one of the host primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery<'a> {
    /// Plain chat line.
    Chat(&'a str),
    /// Center screen text.
    Center(&'a str),
    /// Center HTML overlay shown for `duration_ms`.
    CenterHtml { message: &'a str, duration_ms: u32 },
    /// Alert banner.
    Alert(&'a str),
}

impl Delivery<'_> {
    pub const fn message(&self) -> &str {
        match self {
            Self::Chat(message)
            | Self::Center(message)
            | Self::CenterHtml { message, .. }
            | Self::Alert(message) => *message,
        }
    }
}

/// Port for enumerating players and sending them messages.
///
/// Implementations are fire-and-forget: delivery failures are the host's
/// concern and never surface here.
pub trait PlayerDirectory: Send + Sync {
    /// All currently known player slots, including invalid ones.
    fn players(&self) -> Vec<PlayerSlot>;

    /// Connected player count as reported by the host.
    fn player_count(&self) -> usize;

    /// Deliver a message to one player.
    fn send(&self, player: PlayerId, delivery: Delivery<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_constructors() {
        assert!(PlayerSlot::human(1).is_human());
        assert!(!PlayerSlot::bot(2).is_human());

        let disconnected = PlayerSlot {
            is_valid: false,
            ..PlayerSlot::human(3)
        };
        assert!(!disconnected.is_human());
    }

    #[test]
    fn test_delivery_message() {
        let html = Delivery::CenterHtml {
            message: "<b>hi</b>",
            duration_ms: 5000,
        };
        assert_eq!(html.message(), "<b>hi</b>");
        assert_eq!(Delivery::Alert("alert").message(), "alert");
    }
}
