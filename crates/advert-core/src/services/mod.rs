//! Core services - the broadcaster's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and the domain types
//! in this crate. They never know which host they run in.

mod broadcaster;
mod round_end;
mod sound;

pub use broadcaster::{AdvertBroadcaster, TickReport};
pub use round_end::RoundEndBridge;
pub use sound::{SoundPlayback, SoundPlayer};
