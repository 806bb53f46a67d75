//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (left paddle before right)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod event;
pub mod level;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallStep};
pub use collision::{Collidable, Corner, Face, Surface};
pub use event::GameEvent;
pub use level::{Countdown, Level};
pub use paddle::{Paddle, PaddleInput};
pub use rect::Rect;
pub use state::{ControlMode, LevelPhase, MatchMode, Score, Side};
pub use tick::{TickInput, tick};
