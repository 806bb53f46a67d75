//! Sound cues
//!
//! Maps simulation events to the cues the presentation layer should play.
//! No device access happens here.

use serde::{Deserialize, Serialize};

use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits a wall or a paddle
    Hit,
    /// Point scored, match continues
    Score,
    /// Match won
    Win,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BallHitWall | GameEvent::BallHitPaddle { .. } => Some(SoundEffect::Hit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Won { .. } => Some(SoundEffect::Win),
            GameEvent::BallOut { .. }
            | GameEvent::CountdownTick { .. }
            | GameEvent::BallReleased => None,
        }
    }

    /// Configured volume for this cue
    pub fn volume(&self, settings: &AudioSettings) -> f32 {
        match self {
            SoundEffect::Hit => settings.hit_volume,
            SoundEffect::Score => settings.score_volume,
            SoundEffect::Win => settings.win_volume,
        }
    }
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Volume mixer for the game's cues
#[derive(Debug, Clone)]
pub struct AudioMixer {
    settings: AudioSettings,
    master_volume: f32,
    muted: bool,
}

impl AudioMixer {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            master_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues for a batch of events, in event order
    pub fn cues(&self, events: &[GameEvent]) -> Vec<Cue> {
        if self.muted {
            return Vec::new();
        }
        events
            .iter()
            .filter_map(SoundEffect::for_event)
            .map(|effect| Cue {
                effect,
                volume: effect.volume(&self.settings) * self.master_volume,
            })
            .collect()
    }
}
