//! Crazy Pong - a classic two-paddle Pong simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball physics, level state machine)
//! - `game`: Menu/play lifecycle, UI actions and the fixed-timestep driver
//! - `settings`: Typed, serde-backed configuration
//! - `audio`: Mapping from simulation events to sound cues
//!
//! Rendering, fonts and audio playback live in the presentation layer; this
//! crate only exposes rectangles, scores, counters and events.

pub mod audio;
pub mod error;
pub mod game;
pub mod settings;
pub mod sim;

pub use audio::{AudioMixer, Cue, SoundEffect};
pub use error::SettingsError;
pub use game::{AppState, Game, UiAction};
pub use settings::Settings;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Seed derived from the wall clock, for callers that don't need replays.
pub fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
