//! Collision detection for the ball against paddles
//!
//! The ball is a circle and the paddles are rectangles. Faces are resolved
//! one axis at a time using the previous-frame rectangles to decide which
//! side the ball came from, so an overlap that persists across frames never
//! triggers a second bounce. Corners use a true circle test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Something the ball can bounce off
///
/// Lets the ball's physics pass borrow the paddles without knowing their
/// concrete type.
pub trait Collidable {
    /// Current bounding box
    fn rect(&self) -> Rect;
    /// Bounding box at the start of the current frame
    fn prev_rect(&self) -> Rect;
    /// Current velocity (pixels per second)
    fn velocity(&self) -> Vec2;
    /// Move by `offset`, respecting the entity's own bounds
    fn displace(&mut self, offset: Vec2);
}

/// Movement axis for the sweep passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Face of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub fn axis(&self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::Horizontal,
            Face::Top | Face::Bottom => Axis::Vertical,
        }
    }

    /// Unit normal pointing out of the rectangle
    pub fn normal(&self) -> Vec2 {
        match self {
            Face::Left => Vec2::NEG_X,
            Face::Right => Vec2::X,
            Face::Top => Vec2::NEG_Y,
            Face::Bottom => Vec2::Y,
        }
    }
}

/// Corner of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Corner position on `rect`
    pub fn point(&self, rect: &Rect) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(rect.left(), rect.top()),
            Corner::TopRight => Vec2::new(rect.right(), rect.top()),
            Corner::BottomLeft => Vec2::new(rect.left(), rect.bottom()),
            Corner::BottomRight => Vec2::new(rect.right(), rect.bottom()),
        }
    }

    /// Per-axis signs pointing away from the rectangle
    pub fn outward(&self) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(-1.0, -1.0),
            Corner::TopRight => Vec2::new(1.0, -1.0),
            Corner::BottomLeft => Vec2::new(-1.0, 1.0),
            Corner::BottomRight => Vec2::new(1.0, 1.0),
        }
    }
}

/// Surface the ball last bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    TopWall,
    BottomWall,
    /// Paddle face, keyed by the paddle's index in the physics pass
    PaddleFace(usize, Face),
    PaddleCorner(usize, Corner),
}

/// Face of `target` that `mover` approached, judged from previous-frame boxes
///
/// `tolerance` widens the band so a ball already grazing the face by a few
/// pixels at the start of the frame still counts as approaching.
pub fn approach_face(
    mover_prev: &Rect,
    target_prev: &Rect,
    axis: Axis,
    tolerance: f32,
) -> Option<Face> {
    match axis {
        Axis::Horizontal => {
            if mover_prev.right() <= target_prev.left() + tolerance {
                Some(Face::Left)
            } else if mover_prev.left() >= target_prev.right() - tolerance {
                Some(Face::Right)
            } else {
                None
            }
        }
        Axis::Vertical => {
            if mover_prev.bottom() <= target_prev.top() + tolerance {
                Some(Face::Top)
            } else if mover_prev.top() >= target_prev.bottom() - tolerance {
                Some(Face::Bottom)
            } else {
                None
            }
        }
    }
}

/// Whether a circle center lies in the band facing a face on `axis`
///
/// Horizontal faces (left/right) need the center within the rectangle's
/// vertical span; vertical faces need it within the horizontal span.
/// Outside both bands only a corner can be touched.
pub fn in_face_band(center: Vec2, rect: &Rect, axis: Axis) -> bool {
    match axis {
        Axis::Horizontal => center.y >= rect.top() && center.y <= rect.bottom(),
        Axis::Vertical => center.x >= rect.left() && center.x <= rect.right(),
    }
}

/// Corner touched by a circle whose center is outside both face bands
pub fn corner_contact(center: Vec2, radius: f32, rect: &Rect) -> Option<Corner> {
    if in_face_band(center, rect, Axis::Horizontal) || in_face_band(center, rect, Axis::Vertical) {
        return None;
    }

    let corner = match (center.x < rect.left(), center.y < rect.top()) {
        (true, true) => Corner::TopLeft,
        (false, true) => Corner::TopRight,
        (true, false) => Corner::BottomLeft,
        (false, false) => Corner::BottomRight,
    };

    let dist_sq = (center - corner.point(rect)).length_squared();
    (dist_sq <= radius * radius).then_some(corner)
}

/// Face with the shortest way out for a point inside `rect`
pub fn nearest_face(point: Vec2, rect: &Rect) -> Face {
    [
        (Face::Left, point.x - rect.left()),
        (Face::Right, rect.right() - point.x),
        (Face::Top, point.y - rect.top()),
        (Face::Bottom, rect.bottom() - point.y),
    ]
    .into_iter()
    .min_by(|a, b| a.1.total_cmp(&b.1))
    .map_or(Face::Left, |(face, _)| face)
}
