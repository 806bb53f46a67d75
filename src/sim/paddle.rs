//! Paddles: vertical movement under keyboard or AI control

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collidable;
use super::rect::Rect;
use super::state::{ControlMode, Score, Side};
use crate::settings::Settings;

/// Held-key snapshot for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

impl PaddleInput {
    /// -1 (up), 0 or 1 (down); opposite keys cancel out
    pub fn direction(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// A player or AI paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub control: ControlMode,
    /// Center position
    pub pos: Vec2,
    /// Center position at the start of the current frame
    pub prev_pos: Vec2,
    pub size: Vec2,
    /// Signed vertical velocity from the last update (pixels per second)
    pub velocity: f32,
    pub score: Score,
    speed: f32,
    home: Vec2,
    min_y: f32,
    max_y: f32,
}

impl Paddle {
    pub fn new(side: Side, control: ControlMode, settings: &Settings) -> Self {
        let cfg = &settings.paddle;
        let screen = &settings.screen;
        let half_width = cfg.width / 2.0;
        let half_height = cfg.height / 2.0;

        let home_x = match side {
            Side::Left => cfg.offset_x + half_width,
            Side::Right => screen.width - cfg.offset_x - half_width,
        };
        let home = Vec2::new(home_x, screen.center_y());

        Self {
            side,
            control,
            pos: home,
            prev_pos: home,
            size: Vec2::new(cfg.width, cfg.height),
            velocity: 0.0,
            score: Score::new(settings.match_rules.max_score),
            speed: cfg.velocity,
            home,
            min_y: cfg.wall_offset + half_height,
            max_y: screen.height - cfg.wall_offset - half_height,
        }
    }

    pub fn is_ai(&self) -> bool {
        self.control == ControlMode::Ai
    }

    /// Advance one tick. `ball_y` is only consulted by AI paddles.
    pub fn update(&mut self, dt: f32, input: PaddleInput, ball_y: f32) {
        self.prev_pos = self.pos;

        let dir = match self.control {
            ControlMode::Human => input.direction(),
            ControlMode::Ai => self.ai_direction(ball_y, dt),
        };

        self.velocity = dir * self.speed;
        self.pos.y = (self.pos.y + self.velocity * dt).clamp(self.min_y, self.max_y);
    }

    /// Head for the ball, but only when it's further than one tick of travel
    fn ai_direction(&self, ball_y: f32, dt: f32) -> f32 {
        let dist = ball_y - self.pos.y;
        if dist.abs() > self.speed * dt {
            dist.signum()
        } else {
            0.0
        }
    }

    /// Back to the starting position
    pub fn recenter(&mut self) {
        self.pos = self.home;
        self.prev_pos = self.home;
        self.velocity = 0.0;
    }

    /// Recenter and clear the score
    pub fn reset(&mut self) {
        self.recenter();
        self.score.reset();
    }
}

impl Collidable for Paddle {
    fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    fn prev_rect(&self) -> Rect {
        Rect::from_center_size(self.prev_pos, self.size)
    }

    fn velocity(&self) -> Vec2 {
        Vec2::new(0.0, self.velocity)
    }

    fn displace(&mut self, offset: Vec2) {
        self.pos.y = (self.pos.y + offset.y).clamp(self.min_y, self.max_y);
    }
}
