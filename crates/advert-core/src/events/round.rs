//! Round-end notification and outcome codes.

/// Team codes as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    None = 0,
    Spectator = 1,
    Terrorist = 2,
    CounterTerrorist = 3,
}

impl Team {
    /// Decode a raw team byte. Unknown codes yield `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Spectator),
            2 => Some(Self::Terrorist),
            3 => Some(Self::CounterTerrorist),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Round-end reason shown on the win panel.
///
/// Only the three reasons the broadcaster emits are modelled; values match the
/// engine's round-end reason table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundOutcome {
    CtsWin = 8,
    TerroristsWin = 9,
    RoundDraw = 10,
}

impl RoundOutcome {
    /// Map a raw winner byte to the panel outcome.
    ///
    /// Anything that is not a terrorist or CT win (no winner, spectators,
    /// undefined codes) is a draw.
    pub const fn from_winner(winner: u8) -> Self {
        match Team::from_code(winner) {
            Some(Team::Terrorist) => Self::TerroristsWin,
            Some(Team::CounterTerrorist) => Self::CtsWin,
            Some(Team::None | Team::Spectator) | None => Self::RoundDraw,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Round-end notification carrying the raw winner byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnd {
    pub winner: u8,
}

impl RoundEnd {
    pub const fn new(winner: u8) -> Self {
        Self { winner }
    }

    pub const fn outcome(self) -> RoundOutcome {
        RoundOutcome::from_winner(self.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_codes() {
        for team in [
            Team::None,
            Team::Spectator,
            Team::Terrorist,
            Team::CounterTerrorist,
        ] {
            assert_eq!(Team::from_code(team.code()), Some(team));
        }
        assert_eq!(Team::from_code(4), None);
        assert_eq!(Team::from_code(255), None);
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(RoundOutcome::from_winner(2), RoundOutcome::TerroristsWin);
        assert_eq!(RoundOutcome::from_winner(3), RoundOutcome::CtsWin);
        assert_eq!(RoundOutcome::from_winner(0), RoundOutcome::RoundDraw);
        assert_eq!(RoundOutcome::from_winner(1), RoundOutcome::RoundDraw);
        assert_eq!(RoundOutcome::from_winner(42), RoundOutcome::RoundDraw);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(RoundOutcome::CtsWin.code(), 8);
        assert_eq!(RoundOutcome::TerroristsWin.code(), 9);
        assert_eq!(RoundOutcome::RoundDraw.code(), 10);
    }

    #[test]
    fn test_round_end_accessors() {
        assert_eq!(RoundEnd::new(3).outcome(), RoundOutcome::CtsWin);
        assert_eq!(RoundEnd::new(9).outcome(), RoundOutcome::RoundDraw);
    }
}
