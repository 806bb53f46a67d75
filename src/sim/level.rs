//! Level state machine
//!
//! Owns the two paddles and the ball for one match and drives the
//! `Idle -> Countdown -> Active -> Won` lifecycle. Transitions that are not
//! allowed from the current phase are ignored.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::event::GameEvent;
use super::paddle::Paddle;
use super::state::{ControlMode, LevelPhase, MatchMode, Side};
use crate::settings::{MatchSettings, Settings};

/// Countdown between points, measured on the level clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub started_ms: f64,
    pub step_ms: u64,
    pub steps: u8,
    pub total_ms: u64,
}

impl Countdown {
    pub fn new(started_ms: f64, rules: &MatchSettings) -> Self {
        Self {
            started_ms,
            step_ms: rules.countdown_step_ms,
            steps: rules.countdown_steps,
            total_ms: rules.countdown_ms(),
        }
    }

    /// Displayed value after `elapsed_ms`, or `None` once it has run out
    pub fn value_at(&self, elapsed_ms: f64) -> Option<u8> {
        let elapsed = elapsed_ms.max(0.0);
        if elapsed >= self.total_ms as f64 {
            return None;
        }
        let passed = (elapsed / self.step_ms as f64).floor() as u8;
        Some(self.steps - passed)
    }

    pub fn value(&self, now_ms: f64) -> Option<u8> {
        self.value_at(now_ms - self.started_ms)
    }
}

/// One match: two paddles, one ball and the phase they're in
#[derive(Debug, Clone)]
pub struct Level {
    pub mode: MatchMode,
    pub phase: LevelPhase,
    /// `[left, right]`
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub winner: Option<Side>,
    /// Simulation clock in milliseconds
    pub clock_ms: f64,
    countdown: Option<Countdown>,
    last_counter: Option<u8>,
    settings: Settings,
    rng: Pcg32,
}

impl Level {
    pub fn new(mode: MatchMode, settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddles = Side::BOTH.map(|side| Paddle::new(side, mode.control_for(side), settings));
        let ball = Ball::new(settings, &mut rng);

        Self {
            mode,
            phase: LevelPhase::Idle,
            paddles,
            ball,
            winner: None,
            clock_ms: 0.0,
            countdown: None,
            last_counter: None,
            settings: settings.clone(),
            rng,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn score(&self, side: Side) -> u8 {
        self.paddle(side).score.current
    }

    /// `Idle -> Countdown`
    pub fn start(&mut self) {
        if self.phase != LevelPhase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return;
        }
        log::info!("Match started: {}", self.mode.as_str());
        self.begin_countdown();
    }

    fn begin_countdown(&mut self) {
        self.ball.set_active(false);
        self.countdown = Some(Countdown::new(self.clock_ms, &self.settings.match_rules));
        self.last_counter = None;
        self.phase = LevelPhase::Countdown;
    }

    /// Value to display while counting down
    pub fn counter(&self) -> Option<u8> {
        match (self.phase, self.countdown) {
            (LevelPhase::Countdown, Some(countdown)) => countdown.value(self.clock_ms),
            _ => None,
        }
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.clock_ms += dt as f64 * 1000.0;
    }

    /// Emit counter changes and release the ball once the countdown runs out
    pub fn poll_countdown(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != LevelPhase::Countdown {
            return;
        }
        let Some(countdown) = self.countdown else {
            return;
        };

        match countdown.value(self.clock_ms) {
            Some(value) => {
                if self.last_counter != Some(value) {
                    self.last_counter = Some(value);
                    events.push(GameEvent::CountdownTick { value });
                }
            }
            None => {
                self.countdown = None;
                self.last_counter = None;
                self.ball.set_active(true);
                self.phase = LevelPhase::Active;
                events.push(GameEvent::BallReleased);
            }
        }
    }

    /// Award a point to `scorer`
    ///
    /// Below the limit the ball is served again after a fresh countdown; at
    /// the limit the match is won and play freezes.
    pub fn add_point(&mut self, scorer: Side, events: &mut Vec<GameEvent>) {
        if self.phase != LevelPhase::Active {
            log::debug!("point for {} ignored in {:?}", scorer.as_str(), self.phase);
            return;
        }

        self.paddles[scorer.index()].score.add_point();
        let score = self.score(scorer);
        log::debug!(
            "Point to {}: {}-{}",
            scorer.as_str(),
            self.score(Side::Left),
            self.score(Side::Right)
        );

        if self.check_win() {
            events.push(GameEvent::Won { side: scorer });
            self.ball.reset(true, &mut self.rng);
        } else {
            events.push(GameEvent::Scored { side: scorer, score });
            self.ball.reset(false, &mut self.rng);
            for paddle in &mut self.paddles {
                paddle.recenter();
            }
            self.begin_countdown();
        }
    }

    /// Record the winner the first time a paddle reaches the limit
    ///
    /// Returns `true` only on that transition.
    pub fn check_win(&mut self) -> bool {
        if self.winner.is_some() {
            return false;
        }
        let Some(side) = Side::BOTH
            .into_iter()
            .find(|side| self.paddles[side.index()].score.has_won())
        else {
            return false;
        };

        self.winner = Some(side);
        self.phase = LevelPhase::Won;
        self.countdown = None;
        self.ball.set_active(false);
        log::info!("{}", self.winner_text(side));
        true
    }

    /// `Won -> Countdown` with scores cleared
    pub fn restart(&mut self) {
        if self.phase != LevelPhase::Won {
            log::debug!("restart ignored in {:?}", self.phase);
            return;
        }
        log::info!("Match restarted: {}", self.mode.as_str());
        self.reset_entities();
        self.begin_countdown();
    }

    /// Any phase back to `Idle`
    pub fn back_to_menu(&mut self) {
        self.reset_entities();
        self.countdown = None;
        self.last_counter = None;
        self.phase = LevelPhase::Idle;
    }

    fn reset_entities(&mut self) {
        self.winner = None;
        for paddle in &mut self.paddles {
            paddle.reset();
        }
        self.ball.reset(true, &mut self.rng);
    }

    fn winner_text(&self, side: Side) -> String {
        match self.paddle(side).control {
            ControlMode::Ai => "The AI is the winner".to_string(),
            ControlMode::Human => format!("The player {} is the winner", side.as_str()),
        }
    }

    /// Banner text once the match is won
    pub fn winner_label(&self) -> Option<String> {
        self.winner.map(|side| self.winner_text(side))
    }
}
