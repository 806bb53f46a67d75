//! Game settings
//!
//! Static configuration handed to a level at construction time and treated
//! as immutable for the duration of a match. Every section defaults, so a
//! partial JSON file only needs the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::SettingsError;

/// Playfield dimensions (pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 960.0,
        }
    }
}

impl ScreenSettings {
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// Paddle geometry and speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Vertical speed (pixels per second)
    pub velocity: f32,
    /// Gap between the paddle and its side of the screen
    pub offset_x: f32,
    /// Gap kept between the paddle and the top/bottom walls
    pub wall_offset: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 180.0,
            velocity: 500.0,
            offset_x: 10.0,
            wall_offset: 10.0,
        }
    }
}

/// Ball geometry and speed curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Serve speed (pixels per second)
    pub velocity: f32,
    pub max_velocity: f32,
    /// Speed added on every horizontal paddle hit
    pub boost: f32,
    /// How far past the side edge the ball travels before it counts as out
    pub out_margin: f32,
    /// Serves start at a random y in `[start_offset, height - start_offset]`
    pub start_offset: f32,
    /// Slack allowed when deciding which face the ball approached from
    pub collision_tolerance: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: 12.0,
            velocity: 600.0,
            max_velocity: 1200.0,
            boost: 40.0,
            out_margin: 40.0,
            start_offset: 100.0,
            collision_tolerance: 4.0,
        }
    }
}

/// Scoring and countdown rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Points needed to win a match
    pub max_score: u8,
    /// Duration of one countdown step (ms)
    pub countdown_step_ms: u64,
    /// Number of countdown steps (the first displayed value)
    pub countdown_steps: u8,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_score: 5,
            countdown_step_ms: 700,
            countdown_steps: 3,
        }
    }
}

impl MatchSettings {
    /// Total countdown length (ms)
    pub fn countdown_ms(&self) -> u64 {
        self.countdown_step_ms.saturating_mul(u64::from(self.countdown_steps))
    }
}

/// Cue volumes handed to the presentation layer (0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub hit_volume: f32,
    pub score_volume: f32,
    pub win_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            hit_volume: 0.12,
            score_volume: 0.12,
            win_volume: 0.2,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen: ScreenSettings,
    pub paddle: PaddleSettings,
    pub ball: BallSettings,
    pub match_rules: MatchSettings,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Settings {
            screen,
            paddle,
            ball,
            match_rules,
            audio,
        } = self;

        if screen.width <= 0.0 || screen.height <= 0.0 {
            return Err(SettingsError::invalid("screen", "dimensions must be positive"));
        }
        if paddle.width <= 0.0 || paddle.height <= 0.0 {
            return Err(SettingsError::invalid("paddle", "dimensions must be positive"));
        }
        if paddle.velocity < 0.0 {
            return Err(SettingsError::invalid("paddle.velocity", "must not be negative"));
        }
        if paddle.offset_x < 0.0 {
            return Err(SettingsError::invalid("paddle.offset_x", "must not be negative"));
        }
        if paddle.wall_offset < 0.0 || paddle.height + 2.0 * paddle.wall_offset > screen.height {
            return Err(SettingsError::invalid(
                "paddle.height",
                format!(
                    "{} plus wall offsets does not fit a {} high screen",
                    paddle.height, screen.height
                ),
            ));
        }
        if ball.radius <= 0.0 {
            return Err(SettingsError::invalid("ball.radius", "must be positive"));
        }
        let gap = screen.width - 2.0 * (paddle.offset_x + paddle.width);
        if 2.0 * ball.radius >= gap {
            return Err(SettingsError::invalid(
                "ball.radius",
                "ball does not fit between the paddles",
            ));
        }
        if 2.0 * ball.radius > screen.height {
            return Err(SettingsError::invalid(
                "ball.radius",
                format!("ball does not fit a {} high screen", screen.height),
            ));
        }
        if ball.out_margin < 0.0 {
            return Err(SettingsError::invalid("ball.out_margin", "must not be negative"));
        }
        if ball.collision_tolerance < 0.0 {
            return Err(SettingsError::invalid("ball.collision_tolerance", "must not be negative"));
        }
        if 2.0 * ball.start_offset > screen.height {
            return Err(SettingsError::invalid("ball.start_offset", "serve range is empty"));
        }
        if ball.velocity <= 0.0 || ball.boost < 0.0 {
            return Err(SettingsError::invalid(
                "ball.velocity",
                "speed must be positive and boost non-negative",
            ));
        }
        if ball.max_velocity < ball.velocity {
            return Err(SettingsError::invalid(
                "ball.max_velocity",
                "must be at least the serve velocity",
            ));
        }
        // One tick at top speed must stay shorter than a paddle face or the ball can tunnel.
        if ball.max_velocity * SIM_DT >= paddle.width {
            return Err(SettingsError::invalid(
                "ball.max_velocity",
                format!(
                    "{} px per tick exceeds paddle width {}",
                    ball.max_velocity * SIM_DT,
                    paddle.width
                ),
            ));
        }
        if match_rules.max_score == 0 {
            return Err(SettingsError::invalid("match_rules.max_score", "must be at least 1"));
        }
        let countdown = match_rules
            .countdown_step_ms
            .checked_mul(u64::from(match_rules.countdown_steps));
        if countdown.is_none() {
            return Err(SettingsError::invalid(
                "match_rules.countdown_step_ms",
                format!(
                    "{} ms x {} steps overflows",
                    match_rules.countdown_step_ms, match_rules.countdown_steps
                ),
            ));
        }
        let volumes = [audio.hit_volume, audio.score_volume, audio.win_volume];
        if volumes.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(SettingsError::invalid("audio", "volumes must be within 0.0 - 1.0"));
        }
        Ok(())
    }
}
