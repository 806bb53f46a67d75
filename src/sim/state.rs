//! Shared simulation types
//!
//! Sides, control modes, match modes, score counters and level phases.

use serde::{Deserialize, Serialize};

/// Side of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into a `[left, right]` pair
    pub fn index(&self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Who drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Held up/down keys
    Human,
    /// Tracks the ball's height
    Ai,
}

/// Kind of match picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Left paddle human, right paddle AI
    OnePlayer,
    /// Both paddles human
    TwoPlayer,
    /// Both paddles AI (attract/demo mode)
    Attract,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::OnePlayer => "oneplayer",
            MatchMode::TwoPlayer => "twoplayer",
            MatchMode::Attract => "attract",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "oneplayer" | "one_player" | "1p" => Some(MatchMode::OnePlayer),
            "twoplayer" | "two_player" | "2p" => Some(MatchMode::TwoPlayer),
            "attract" | "demo" => Some(MatchMode::Attract),
            _ => None,
        }
    }

    /// Control mode for the paddle on `side`
    pub fn control_for(&self, side: Side) -> ControlMode {
        match (self, side) {
            (MatchMode::Attract, _) => ControlMode::Ai,
            (MatchMode::OnePlayer, Side::Right) => ControlMode::Ai,
            _ => ControlMode::Human,
        }
    }
}

/// A paddle's points in the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub current: u8,
    pub max: u8,
}

impl Score {
    pub fn new(max: u8) -> Self {
        Self { current: 0, max }
    }

    /// Add a point; never goes past the match limit
    pub fn add_point(&mut self) {
        if self.current < self.max {
            self.current += 1;
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn has_won(&self) -> bool {
        self.current >= self.max
    }
}

/// Phase of the level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Built but not started (or returned to the menu)
    Idle,
    /// Ball frozen while the 3-2-1 counter runs
    Countdown,
    /// Ball in play
    Active,
    /// Score limit reached; waiting for restart or back-to-menu
    Won,
}
