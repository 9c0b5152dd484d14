//! Game events consumed and produced by the broadcaster.
//!
//! - `round` - Round-end notification and the team / outcome codes it maps to
//! - `panel` - Win-panel broadcast fired on round end

mod panel;
mod round;

pub use panel::WinPanelEvent;
pub use round::{RoundEnd, RoundOutcome, Team};
