//! Round-end handler that fires the deferred win panel.

use std::sync::Arc;

use tracing::debug;

use crate::events::{RoundEnd, WinPanelEvent};
use crate::panel::PanelCache;
use crate::ports::GameEventBus;

/// Fires the win panel with the cached panel message when a round ends.
#[derive(Clone)]
pub struct RoundEndBridge {
    panel: Arc<PanelCache>,
    events: Arc<dyn GameEventBus>,
}

impl RoundEndBridge {
    pub fn new(panel: Arc<PanelCache>, events: Arc<dyn GameEventBus>) -> Self {
        Self { panel, events }
    }

    /// Handle a round end.
    ///
    /// Does nothing while the panel cache is idle. Otherwise fires one win
    /// panel event and returns it. The cache is left as is.
    pub fn on_round_end(&self, round: RoundEnd) -> Option<WinPanelEvent> {
        let message = self.panel.current()?;
        let event = WinPanelEvent::new(round.outcome(), message);

        debug!(
            winner = round.winner,
            final_event = event.final_event,
            "Firing win panel advert"
        );
        self.events.fire_win_panel(event.clone());
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RoundOutcome, Team};
    use crate::ports::game_events::MockGameEventBus;

    fn bridge_with(panel: &Arc<PanelCache>, bus: MockGameEventBus) -> RoundEndBridge {
        RoundEndBridge::new(Arc::clone(panel), Arc::new(bus))
    }

    #[test]
    fn test_idle_panel_fires_nothing() {
        let panel = Arc::new(PanelCache::new());
        let mut bus = MockGameEventBus::new();
        bus.expect_fire_win_panel().times(0);

        let bridge = bridge_with(&panel, bus);
        assert_eq!(bridge.on_round_end(RoundEnd::new(Team::Terrorist.code())), None);
    }

    #[test]
    fn test_ct_win_fires_panel() {
        let panel = Arc::new(PanelCache::new());
        panel.store("Visit our site");
        let mut bus = MockGameEventBus::new();
        bus.expect_fire_win_panel()
            .withf(|event| {
                event.final_event == RoundOutcome::CtsWin.code()
                    && event.funfact_token == "Visit our site"
            })
            .times(1)
            .return_const(());

        let bridge = bridge_with(&panel, bus);
        let fired = bridge
            .on_round_end(RoundEnd::new(Team::CounterTerrorist.code()))
            .unwrap();
        assert_eq!(fired.final_event, 8);
    }

    #[test]
    fn test_unknown_winner_is_a_draw() {
        let panel = Arc::new(PanelCache::new());
        panel.store("gg");
        let mut bus = MockGameEventBus::new();
        bus.expect_fire_win_panel().times(3).return_const(());

        let bridge = bridge_with(&panel, bus);
        for winner in [Team::None.code(), Team::Spectator.code(), 42] {
            let fired = bridge.on_round_end(RoundEnd::new(winner)).unwrap();
            assert_eq!(fired.final_event, RoundOutcome::RoundDraw.code());
        }
    }

    #[test]
    fn test_panel_stays_armed_across_rounds() {
        let panel = Arc::new(PanelCache::new());
        panel.store("sticky");
        let mut bus = MockGameEventBus::new();
        bus.expect_fire_win_panel().times(2).return_const(());

        let bridge = bridge_with(&panel, bus);
        assert!(bridge.on_round_end(RoundEnd::new(2)).is_some());
        assert!(bridge.on_round_end(RoundEnd::new(3)).is_some());
        assert!(panel.is_armed());
    }
}
