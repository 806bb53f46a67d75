//! Ball movement, wall/paddle bounces and speed escalation
//!
//! Movement is swept one axis at a time: x is advanced and checked against
//! the paddles' left/right faces, then y is advanced and checked against the
//! top/bottom faces and corners. Each axis gets at most one response per
//! frame, and a ball still overlapping a paddle after both passes is pushed
//! back out. Every bounce flips a direction sign, so the direction stays on the
//! diagonals and only `speed` changes over a rally.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    Axis, Collidable, Corner, Face, Surface, approach_face, corner_contact, in_face_band,
    nearest_face,
};
use super::rect::Rect;
use super::state::Side;
use crate::settings::{BallSettings, ScreenSettings, Settings};

/// What happened to the ball during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallStep {
    /// Surfaces bounced off, in order
    pub contacts: Vec<Surface>,
    /// Screen side the ball left through, if it is out
    pub exit: Option<Side>,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Center position at the start of the current frame
    pub prev_pos: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Scalar speed (pixels per second)
    pub speed: f32,
    pub radius: f32,
    /// Frozen while inactive (countdown, after a win)
    pub active: bool,
    /// Last surface the ball reflected off; the same surface can't reflect it twice in a row
    pub last_contact: Option<Surface>,
    cfg: BallSettings,
    screen: ScreenSettings,
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Flip one component of a direction vector
fn reflect_axis(direction: &mut Vec2, axis: Axis) {
    match axis {
        Axis::Horizontal => direction.x = -direction.x,
        Axis::Vertical => direction.y = -direction.y,
    }
}

impl Ball {
    /// New inactive ball at a random serve position
    pub fn new<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: settings.ball.velocity,
            radius: settings.ball.radius,
            active: false,
            last_contact: None,
            cfg: settings.ball.clone(),
            screen: settings.screen.clone(),
        };
        ball.reset(true, rng);
        ball
    }

    /// Current velocity vector
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn prev_rect(&self) -> Rect {
        Rect::around_circle(self.prev_pos, self.radius)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Back to the serve line, inactive, at serve speed
    ///
    /// After a point (`full == false`) the horizontal direction is inverted
    /// and only the vertical one is re-rolled; a new match re-rolls both.
    pub fn reset<R: Rng + ?Sized>(&mut self, full: bool, rng: &mut R) {
        self.speed = self.cfg.velocity;
        self.pos = self.serve_position(rng);
        self.prev_pos = self.pos;
        self.active = false;
        self.last_contact = None;

        let sx = if full || self.direction.x == 0.0 {
            random_sign(rng)
        } else {
            -self.direction.x.signum()
        };
        let sy = random_sign(rng);
        self.direction = Vec2::new(sx, sy).normalize();
    }

    fn serve_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let min_y = self.cfg.start_offset;
        let max_y = self.screen.height - self.cfg.start_offset;
        Vec2::new(self.screen.center_x(), rng.random_range(min_y..=max_y))
    }

    /// Add the paddle boost, saturating at the maximum speed
    pub fn speed_up(&mut self) {
        self.speed = (self.speed + self.cfg.boost).min(self.cfg.max_velocity);
    }

    /// Advance one tick against the given paddles
    ///
    /// Paddle indices in the returned surfaces match the order of `paddles`.
    pub fn update(&mut self, dt: f32, paddles: &mut [&mut dyn Collidable]) -> BallStep {
        let mut step = BallStep::default();
        self.prev_pos = self.pos;
        if !self.active {
            return step;
        }

        let velocity = self.velocity();
        let mut resolved_x = false;
        let mut resolved_y = false;

        self.pos.x += velocity.x * dt;
        for (index, paddle) in paddles.iter_mut().enumerate() {
            if let Some(surface) = self.resolve_face(index, &mut **paddle, Axis::Horizontal) {
                step.contacts.push(surface);
                resolved_x = true;
                break;
            }
        }

        self.pos.y += velocity.y * dt;
        for (index, paddle) in paddles.iter_mut().enumerate() {
            if !resolved_y {
                if let Some(surface) = self.resolve_face(index, &mut **paddle, Axis::Vertical) {
                    step.contacts.push(surface);
                    resolved_y = true;
                    continue;
                }
            }
            if !resolved_x && !resolved_y {
                if let Some(surface) = self.resolve_corner(index, &mut **paddle) {
                    step.contacts.push(surface);
                    resolved_x = true;
                    resolved_y = true;
                }
            }
        }

        if step.contacts.is_empty() {
            for (index, paddle) in paddles.iter_mut().enumerate() {
                if let Some(surface) = self.resolve_overlap(index, &mut **paddle) {
                    step.contacts.push(surface);
                    break;
                }
            }
        }

        if let Some(surface) = self.resolve_walls() {
            step.contacts.push(surface);
        }

        step.exit = self.exit_side();
        step
    }

    /// Face collision on one axis
    ///
    /// A face only responds when the previous-frame boxes show the ball
    /// coming from outside that face. The ball is always placed flush; the
    /// direction is only reflected when it points into the paddle.
    fn resolve_face(
        &mut self,
        index: usize,
        paddle: &mut dyn Collidable,
        axis: Axis,
    ) -> Option<Surface> {
        let target = paddle.rect();
        if !self.rect().overlaps(&target) || !in_face_band(self.pos, &target, axis) {
            return None;
        }

        let face = approach_face(
            &self.prev_rect(),
            &paddle.prev_rect(),
            axis,
            self.cfg.collision_tolerance,
        )?;
        self.respond_face(index, paddle, face)
    }

    /// Place the ball flush against `face` and bounce it if it is heading in
    fn respond_face(
        &mut self,
        index: usize,
        paddle: &mut dyn Collidable,
        face: Face,
    ) -> Option<Surface> {
        let target = paddle.rect();
        let r = self.radius;
        match face {
            Face::Left => self.pos.x = target.left() - r,
            Face::Right => self.pos.x = target.right() + r,
            Face::Top => {
                let y = target.top() - r;
                if y < r {
                    // Squeezed against the top wall: hold the ball, shove the paddle
                    self.pos.y = r;
                    paddle.displace(Vec2::new(0.0, 2.0 * r - target.top()));
                } else {
                    self.pos.y = y;
                }
            }
            Face::Bottom => {
                let y = target.bottom() + r;
                let max_y = self.screen.height - r;
                if y > max_y {
                    self.pos.y = max_y;
                    paddle.displace(Vec2::new(0.0, (max_y - r) - target.bottom()));
                } else {
                    self.pos.y = y;
                }
            }
        }

        let surface = Surface::PaddleFace(index, face);
        let moving_in = self.direction.dot(face.normal()) < 0.0;
        if !moving_in || self.last_contact == Some(surface) {
            return None;
        }

        reflect_axis(&mut self.direction, face.axis());
        if face.axis() == Axis::Horizontal {
            self.speed_up();
        }
        self.last_contact = Some(surface);
        log::trace!(
            "ball hit paddle {} on {:?} (paddle vy {:.0}), speed {}",
            index,
            face,
            paddle.velocity().y,
            self.speed
        );
        Some(surface)
    }

    /// Circle-vs-corner bounce
    ///
    /// The ball is moved out to touch the corner. Every component heading
    /// into the paddle is reflected, so a ball arriving diagonally bounces
    /// straight back.
    fn resolve_corner(&mut self, index: usize, paddle: &mut dyn Collidable) -> Option<Surface> {
        let corner = corner_contact(self.pos, self.radius, &paddle.rect())?;
        self.respond_corner(index, paddle, corner)
    }

    fn respond_corner(
        &mut self,
        index: usize,
        paddle: &mut dyn Collidable,
        corner: Corner,
    ) -> Option<Surface> {
        let point = corner.point(&paddle.rect());
        let out = corner.outward();
        let normal = (self.pos - point)
            .try_normalize()
            .unwrap_or_else(|| out.normalize());
        self.pos = point + normal * self.radius;

        let surface = Surface::PaddleCorner(index, corner);
        let into_x = self.direction.x * out.x < 0.0;
        let into_y = self.direction.y * out.y < 0.0;
        if !(into_x || into_y) || self.last_contact == Some(surface) {
            return None;
        }

        if into_y {
            reflect_axis(&mut self.direction, Axis::Vertical);
        }
        if into_x {
            reflect_axis(&mut self.direction, Axis::Horizontal);
            self.speed_up();
        }
        self.last_contact = Some(surface);
        log::trace!("ball hit paddle {} corner {:?}", index, corner);
        Some(surface)
    }

    /// Push the ball out of a paddle it still overlaps after both sweeps
    ///
    /// A diagonal approach near a corner can slip past both passes: during
    /// the x move the center is still above the face band, during the y move
    /// it is still beside the paddle. The exit face follows from where the
    /// center ended up; a center inside the paddle leaves by the nearest face.
    fn resolve_overlap(&mut self, index: usize, paddle: &mut dyn Collidable) -> Option<Surface> {
        let target = paddle.rect();
        let offset = self.pos - target.closest_point(self.pos);
        if offset.length_squared() >= self.radius * self.radius {
            return None;
        }

        let in_horizontal = in_face_band(self.pos, &target, Axis::Horizontal);
        let in_vertical = in_face_band(self.pos, &target, Axis::Vertical);
        let face = match (in_horizontal, in_vertical) {
            (false, false) => {
                let corner = corner_contact(self.pos, self.radius, &target)?;
                return self.respond_corner(index, paddle, corner);
            }
            (true, false) if self.pos.x < target.left() => Face::Left,
            (true, false) => Face::Right,
            (false, true) if self.pos.y < target.top() => Face::Top,
            (false, true) => Face::Bottom,
            (true, true) => nearest_face(self.pos, &target),
        };
        log::debug!("ball overlapping paddle {}, pushed out through {:?}", index, face);
        self.respond_face(index, paddle, face)
    }

    /// Keep the ball between the top and bottom walls
    fn resolve_walls(&mut self) -> Option<Surface> {
        let min_y = self.radius;
        let max_y = self.screen.height - self.radius;

        if self.pos.y < min_y {
            self.pos.y = min_y;
            if self.direction.y < 0.0 {
                self.direction.y = -self.direction.y;
                self.last_contact = Some(Surface::TopWall);
                return Some(Surface::TopWall);
            }
        } else if self.pos.y > max_y {
            self.pos.y = max_y;
            if self.direction.y > 0.0 {
                self.direction.y = -self.direction.y;
                self.last_contact = Some(Surface::BottomWall);
                return Some(Surface::BottomWall);
            }
        }
        None
    }

    /// Side of the screen the ball has left through
    fn exit_side(&self) -> Option<Side> {
        if self.pos.x - self.radius < -self.cfg.out_margin {
            Some(Side::Left)
        } else if self.pos.x + self.radius > self.screen.width + self.cfg.out_margin {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::paddle::Paddle;
    use crate::sim::state::ControlMode;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_1_SQRT_2;

    fn setup() -> (Settings, Pcg32) {
        (Settings::default(), Pcg32::seed_from_u64(12345))
    }

    fn paddles(settings: &Settings) -> (Paddle, Paddle) {
        (
            Paddle::new(Side::Left, ControlMode::Human, settings),
            Paddle::new(Side::Right, ControlMode::Human, settings),
        )
    }

    /// Active ball at `pos` heading along the given signs
    fn ball_at(settings: &Settings, rng: &mut Pcg32, pos: Vec2, sx: f32, sy: f32) -> Ball {
        let mut ball = Ball::new(settings, rng);
        ball.pos = pos;
        ball.prev_pos = pos;
        ball.direction = Vec2::new(sx, sy).normalize();
        ball.active = true;
        ball
    }

    fn step(ball: &mut Ball, left: &mut Paddle, right: &mut Paddle, dt: f32) -> BallStep {
        let mut list: [&mut dyn Collidable; 2] = [left, right];
        ball.update(dt, &mut list)
    }

    #[test]
    fn test_new_ball_is_inactive_at_serve_line() {
        let (settings, mut rng) = setup();
        let ball = Ball::new(&settings, &mut rng);
        assert!(!ball.active);
        assert_eq!(ball.pos.x, 640.0);
        assert!(ball.pos.y >= 100.0 && ball.pos.y <= 860.0);
        assert!((ball.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(ball.speed, 600.0);
    }

    #[test]
    fn test_inactive_ball_does_not_move() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        let mut ball = Ball::new(&settings, &mut rng);
        let start = ball.pos;
        let result = step(&mut ball, &mut left, &mut right, 0.1);
        assert_eq!(ball.pos, start);
        assert_eq!(result, BallStep::default());
    }

    #[test]
    fn test_moves_along_direction() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(640.0, 480.0), 1.0, 1.0);
        step(&mut ball, &mut left, &mut right, 0.1);
        let expected = 640.0 + 600.0 * FRAC_1_SQRT_2 * 0.1;
        assert!((ball.pos.x - expected).abs() < 1e-3);
        assert_eq!(ball.prev_pos, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_bounces_off_top_wall() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(640.0, 14.0), 1.0, -1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert_eq!(result.contacts, vec![Surface::TopWall]);
        assert!(ball.direction.y > 0.0);
        assert!(ball.direction.x > 0.0);
        assert_eq!(ball.pos.y, ball.radius);
    }

    #[test]
    fn test_bounces_off_bottom_wall() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(640.0, 946.0), -1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert_eq!(result.contacts, vec![Surface::BottomWall]);
        assert!(ball.direction.y < 0.0);
        assert_eq!(ball.pos.y, 960.0 - ball.radius);
    }

    #[test]
    fn test_wall_does_not_reflect_ball_moving_away() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Pushed slightly past the wall but already heading down
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(640.0, 5.0), 1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert!(result.contacts.is_empty());
        assert!(ball.direction.y > 0.0);
        assert_eq!(ball.pos.y, ball.radius);
    }

    #[test]
    fn test_bounces_off_right_paddle_face_and_speeds_up() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Right paddle face at x = 1258; ball edge 2px short of it
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1244.0, 480.0), 1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);

        assert_eq!(result.contacts, vec![Surface::PaddleFace(1, Face::Left)]);
        assert!(ball.direction.x < 0.0);
        assert!(ball.direction.y > 0.0);
        assert_eq!(ball.pos.x, 1258.0 - ball.radius);
        assert_eq!(ball.speed, 640.0);
    }

    #[test]
    fn test_bounces_off_left_paddle_face() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Left paddle face at x = 22
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(36.0, 450.0), -1.0, -1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);

        assert_eq!(result.contacts, vec![Surface::PaddleFace(0, Face::Right)]);
        assert!(ball.direction.x > 0.0);
        assert_eq!(ball.pos.x, 22.0 + ball.radius);
    }

    #[test]
    fn test_overlap_from_previous_frame_does_not_retrigger() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Ball already half inside the right paddle at the start of the frame
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1262.0, 480.0), -1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert!(result.contacts.is_empty());
        assert!(ball.direction.x < 0.0);
        assert_eq!(ball.speed, 600.0);
    }

    #[test]
    fn test_ball_moving_away_is_not_reflected() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Grazing the face while already heading away from it
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1250.0, 480.0), -1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert!(result.contacts.is_empty());
        assert!(ball.direction.x < 0.0);
    }

    #[test]
    fn test_top_face_bounce() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Right paddle top at y = 390, ball dropping onto it within the x span
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1264.0, 376.0), 1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);

        assert_eq!(result.contacts, vec![Surface::PaddleFace(1, Face::Top)]);
        assert!(ball.direction.y < 0.0);
        assert_eq!(ball.pos.y, 390.0 - ball.radius);
        // Vertical bounces don't boost
        assert_eq!(ball.speed, 600.0);
    }

    #[test]
    fn test_squeezed_ball_shoves_paddle() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Paddle at the very top, ball wedged between it and the top wall
        right.pos.y = 100.0;
        right.prev_pos.y = 100.0;
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1264.0, 0.0), 1.0, 1.0);
        step(&mut ball, &mut left, &mut right, SIM_DT);

        assert_eq!(ball.pos.y, ball.radius);
        assert!((right.rect().top() - 2.0 * ball.radius).abs() < 1e-3);
    }

    #[test]
    fn test_corner_bounce_reflects_both_axes() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Right paddle top-left corner at (1258, 390); ball approaching diagonally
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1246.0, 378.0), 1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);

        assert_eq!(
            result.contacts,
            vec![Surface::PaddleCorner(1, Corner::TopLeft)]
        );
        assert!(ball.direction.x < 0.0);
        assert!(ball.direction.y < 0.0);
        let corner = Vec2::new(1258.0, 390.0);
        assert!(((ball.pos - corner).length() - ball.radius).abs() < 1e-3);
        assert_eq!(ball.speed, 640.0);
    }

    #[test]
    fn test_corner_near_miss_is_ignored() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // AABBs will overlap after the move but the circle stays clear of the corner
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1243.0, 375.0), 1.0, 1.0);
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert!(result.contacts.is_empty());
        assert!(ball.direction.x > 0.0);
    }

    #[test]
    fn test_fast_diagonal_past_paddle_corner_still_bounces() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Aimed just above the right paddle's top-left corner (1258, 390) at full speed.
        // The x move keeps the center above the face band and the y move keeps it
        // beside the paddle, so neither sweep sees the contact.
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1240.0, 376.5), 1.0, 1.0);
        ball.speed = settings.ball.max_velocity;

        let mut contacts = Vec::new();
        for _ in 0..12 {
            let result = step(&mut ball, &mut left, &mut right, SIM_DT);
            assert_eq!(result.exit, None);
            contacts.extend(result.contacts);
        }

        assert_eq!(contacts, vec![Surface::PaddleFace(1, Face::Left)]);
        assert!(ball.direction.x < 0.0);
        assert!(ball.pos.x < 1258.0 - ball.radius);
        assert_eq!(ball.speed, settings.ball.max_velocity);
    }

    #[test]
    fn test_ball_left_inside_paddle_is_pushed_out_nearest_face() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        // Center inside the right paddle, 3px below its top face and heading up and out
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1264.0, 393.0), 1.0, -1.0);
        let result = step(&mut ball, &mut left, &mut right, 0.0);

        assert!(result.contacts.is_empty());
        assert_eq!(ball.pos.y, 390.0 - ball.radius);
        assert!(ball.direction.y < 0.0);
    }

    #[test]
    fn test_same_surface_cannot_reflect_twice() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1244.0, 480.0), 1.0, 1.0);
        ball.last_contact = Some(Surface::PaddleFace(1, Face::Left));
        let result = step(&mut ball, &mut left, &mut right, SIM_DT);
        assert!(result.contacts.is_empty());
        // Still placed flush, just not reflected
        assert_eq!(ball.pos.x, 1258.0 - ball.radius);
    }

    #[test]
    fn test_exit_sides() {
        let (settings, mut rng) = setup();
        let (mut left, mut right) = paddles(&settings);

        let mut ball = ball_at(&settings, &mut rng, Vec2::new(-25.0, 480.0), -1.0, 1.0);
        assert_eq!(step(&mut ball, &mut left, &mut right, SIM_DT).exit, Some(Side::Left));

        let mut ball = ball_at(&settings, &mut rng, Vec2::new(1305.0, 480.0), 1.0, 1.0);
        assert_eq!(step(&mut ball, &mut left, &mut right, SIM_DT).exit, Some(Side::Right));

        let mut ball = ball_at(&settings, &mut rng, Vec2::new(640.0, 480.0), 1.0, 1.0);
        assert_eq!(step(&mut ball, &mut left, &mut right, SIM_DT).exit, None);
    }

    #[test]
    fn test_speed_saturates() {
        let (settings, mut rng) = setup();
        let mut ball = Ball::new(&settings, &mut rng);
        for _ in 0..100 {
            ball.speed_up();
        }
        assert_eq!(ball.speed, settings.ball.max_velocity);
    }

    #[test]
    fn test_partial_reset_inverts_horizontal_direction() {
        let (settings, mut rng) = setup();
        let mut ball = ball_at(&settings, &mut rng, Vec2::new(-30.0, 480.0), -1.0, 1.0);
        ball.speed = 900.0;
        ball.reset(false, &mut rng);

        assert!(!ball.active);
        assert!(ball.direction.x > 0.0);
        assert!((ball.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(ball.speed, 600.0);
        assert_eq!(ball.pos.x, 640.0);
        assert!(ball.last_contact.is_none());
    }

    #[test]
    fn test_full_reset_rolls_both_axes() {
        let (settings, mut rng) = setup();
        let mut ball = Ball::new(&settings, &mut rng);
        let mut seen_x = [false; 2];
        let mut seen_y = [false; 2];
        for _ in 0..64 {
            ball.reset(true, &mut rng);
            seen_x[(ball.direction.x > 0.0) as usize] = true;
            seen_y[(ball.direction.y > 0.0) as usize] = true;
        }
        assert_eq!(seen_x, [true, true]);
        assert_eq!(seen_y, [true, true]);
    }

    proptest! {
        #[test]
        fn prop_wall_contact_flips_once_and_clamps(
            x in 200.0f32..1000.0,
            y in -20.0f32..980.0,
            up in any::<bool>(),
            dt in 0.001f32..0.02,
        ) {
            let (settings, mut rng) = setup();
            let (mut left, mut right) = paddles(&settings);
            let sy = if up { -1.0 } else { 1.0 };
            let mut ball = ball_at(&settings, &mut rng, Vec2::new(x, y), 1.0, sy);

            let result = step(&mut ball, &mut left, &mut right, dt);
            let wall_hits = result
                .contacts
                .iter()
                .filter(|s| matches!(s, Surface::TopWall | Surface::BottomWall))
                .count();
            prop_assert!(wall_hits <= 1);
            if wall_hits == 1 {
                prop_assert!(ball.direction.y.signum() != sy);
            }
            prop_assert!(ball.pos.y >= ball.radius && ball.pos.y <= 960.0 - ball.radius);

            // Next frame moves away from the wall, so no second flip
            let again = step(&mut ball, &mut left, &mut right, dt);
            if wall_hits == 1 {
                prop_assert!(again.contacts.is_empty());
            }
        }

        #[test]
        fn prop_no_tunneling_at_max_speed(
            gap in 0.0f32..8.0,
            y in 400.0f32..560.0,
            down in any::<bool>(),
            speed_fraction in 0.5f32..=1.0,
        ) {
            let (settings, mut rng) = setup();
            let (mut left, mut right) = paddles(&settings);
            let sy = if down { 1.0 } else { -1.0 };
            let face = right.rect().left();
            let start = Vec2::new(face - gap - settings.ball.radius, y);
            let mut ball = ball_at(&settings, &mut rng, start, 1.0, sy);
            ball.speed = settings.ball.max_velocity * speed_fraction;

            for _ in 0..4 {
                step(&mut ball, &mut left, &mut right, SIM_DT);
                // The ball's center never gets past the face it is approaching
                prop_assert!(ball.pos.x <= face);
            }
            prop_assert!(ball.direction.x < 0.0);
        }

        #[test]
        fn prop_ball_never_ends_a_tick_overlapping_a_paddle_edge(
            gap in 0.0f32..24.0,
            near_top in any::<bool>(),
            edge_offset in -30.0f32..30.0,
            down in any::<bool>(),
            speed_fraction in 0.5f32..=1.0,
        ) {
            let (settings, mut rng) = setup();
            let (mut left, mut right) = paddles(&settings);
            let target = right.rect();
            let edge = if near_top { target.top() } else { target.bottom() };
            let sy = if down { 1.0 } else { -1.0 };
            let start = Vec2::new(
                target.left() - gap - settings.ball.radius,
                edge + edge_offset,
            );
            let mut ball = ball_at(&settings, &mut rng, start, 1.0, sy);
            ball.speed = settings.ball.max_velocity * speed_fraction;

            for _ in 0..10 {
                step(&mut ball, &mut left, &mut right, SIM_DT);
                let distance = (ball.pos - target.closest_point(ball.pos)).length();
                prop_assert!(
                    distance >= ball.radius - 1e-3,
                    "ball at {:?} is {} from the paddle",
                    ball.pos,
                    distance
                );
            }
        }
    }
}
