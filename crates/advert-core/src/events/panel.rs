//! Win-panel broadcast.

use super::RoundOutcome;

/// Payload of the host's win-panel event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinPanelEvent {
    /// Round-end reason code (see [`RoundOutcome`]).
    pub final_event: u8,
    /// Freeform text shown on the panel.
    pub funfact_token: String,
}

impl WinPanelEvent {
    pub fn new(outcome: RoundOutcome, token: impl Into<String>) -> Self {
        Self {
            final_event: outcome.code(),
            funfact_token: token.into(),
        }
    }
}
