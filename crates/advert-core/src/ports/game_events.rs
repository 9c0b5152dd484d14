//! Game-event bus port.

use crate::events::WinPanelEvent;

/// Port for publishing events on the host game-event bus.
///
/// Round-end notifications flow the other way: the host calls the plugin's
/// round-end handler directly.
#[cfg_attr(test, mockall::automock)]
pub trait GameEventBus: Send + Sync {
    /// Fire the round win panel.
    fn fire_win_panel(&self, event: WinPanelEvent);
}

/// A no-op bus for tests and hosts without a win panel.
#[derive(Debug, Clone, Default)]
pub struct NoopGameEventBus;

impl GameEventBus for NoopGameEventBus {
    fn fire_win_panel(&self, _event: WinPanelEvent) {}
}
