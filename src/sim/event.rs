//! Events emitted by the simulation for the presentation layer

use serde::{Deserialize, Serialize};

use super::state::Side;

/// Something that happened during a tick
///
/// Returned from [`super::tick::tick`] in order of occurrence; the caller maps
/// them to sounds, HUD updates and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    BallHitWall,
    /// Ball bounced off a paddle
    BallHitPaddle { side: Side, corner: bool },
    /// Ball left the field; `scorer` receives the point
    BallOut { scorer: Side },
    /// A point was scored and the match continues
    Scored { side: Side, score: u8 },
    /// `side` reached the score limit
    Won { side: Side },
    /// Countdown display changed
    CountdownTick { value: u8 },
    /// Countdown finished and the ball is moving
    BallReleased,
}
