//! Fixed timestep simulation tick
//!
//! Core game loop that advances a level deterministically.

use serde::{Deserialize, Serialize};

use super::collision::{Collidable, Surface};
use super::event::GameEvent;
use super::level::Level;
use super::paddle::PaddleInput;
use super::state::{LevelPhase, Side};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Left paddle keys (W/S by default)
    pub left: PaddleInput,
    /// Right paddle keys (up/down arrows by default)
    pub right: PaddleInput,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> PaddleInput {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Advance the level by one fixed timestep
///
/// Events come back in the order they happened.
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing runs until the level is started
    if level.phase == LevelPhase::Idle {
        return events;
    }

    level.advance_clock(dt);
    level.poll_countdown(&mut events);

    if level.phase == LevelPhase::Won {
        return events;
    }

    let ball_y = level.ball.pos.y;
    for paddle in &mut level.paddles {
        paddle.update(dt, input.for_side(paddle.side), ball_y);
    }

    let step = {
        let [left, right] = &mut level.paddles;
        let mut paddles: [&mut dyn Collidable; 2] = [left, right];
        level.ball.update(dt, &mut paddles)
    };

    for surface in step.contacts {
        let event = match surface {
            Surface::TopWall | Surface::BottomWall => GameEvent::BallHitWall,
            Surface::PaddleFace(index, _) => GameEvent::BallHitPaddle {
                side: level.paddles[index].side,
                corner: false,
            },
            Surface::PaddleCorner(index, _) => GameEvent::BallHitPaddle {
                side: level.paddles[index].side,
                corner: true,
            },
        };
        events.push(event);
    }

    if let Some(exit) = step.exit {
        let scorer = exit.opponent();
        events.push(GameEvent::BallOut { scorer });
        level.add_point(scorer, &mut events);
    }

    events
}
