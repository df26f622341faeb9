//! Body primitives: paddle, balls and bricks
//!
//! Bodies only know how to move themselves and flip their own velocity.
//! Anything involving two bodies (bounces off bricks, English, scoring)
//! is applied by the collision resolver and the match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Circle, Rect};
use crate::sanitize_dt;
use crate::tuning::Tuning;

/// Paddle steering intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Neutral,
    Right,
}

impl Direction {
    /// Map a raw signal (-1, 0, 1) to a direction; anything else is Neutral
    pub fn from_signal(signal: i32) -> Self {
        match signal {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::Neutral,
        }
    }

    /// Parse a direction name; unknown names are Neutral
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Direction::Left,
            "right" | "r" => Direction::Right,
            _ => Direction::Neutral,
        }
    }

    /// -1, 0 or 1
    #[inline]
    pub fn signum(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Neutral => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Liveness of a ball or brick. Destroyed bodies stay in their collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyStatus {
    #[default]
    Active,
    Destroyed,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Horizontal speed at full steer (units/sec)
    pub max_speed: f32,
    /// Direction applied on the most recent tick
    pub direction: Direction,
}

impl Paddle {
    /// Paddle centered horizontally near the arena bottom
    pub fn new(arena: Vec2, tuning: &Tuning) -> Self {
        let x = ((arena.x - tuning.paddle_width) / 2.0).max(0.0);
        let y = arena.y - tuning.paddle_bottom_margin;
        Self {
            rect: Rect::new(x, y, tuning.paddle_width, tuning.paddle_height),
            max_speed: tuning.paddle_max_speed,
            direction: Direction::Neutral,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.size.x
    }

    /// Largest legal x for the paddle's left edge
    #[inline]
    fn max_x(&self, arena_width: f32) -> f32 {
        (arena_width - self.width()).max(0.0)
    }

    pub fn move_left(&mut self, dt: f32, arena_width: f32) {
        self.rect.pos.x -= self.max_speed * sanitize_dt(dt);
        self.clamp_to_arena(arena_width);
    }

    pub fn move_right(&mut self, dt: f32, arena_width: f32) {
        self.rect.pos.x += self.max_speed * sanitize_dt(dt);
        self.clamp_to_arena(arena_width);
    }

    /// Record the steering direction and move accordingly
    pub fn steer(&mut self, direction: Direction, dt: f32, arena_width: f32) {
        self.direction = direction;
        match direction {
            Direction::Left => self.move_left(dt, arena_width),
            Direction::Right => self.move_right(dt, arena_width),
            Direction::Neutral => self.clamp_to_arena(arena_width),
        }
    }

    /// Hard stop at the arena walls (no bounce)
    pub fn clamp_to_arena(&mut self, arena_width: f32) {
        let max_x = self.max_x(arena_width);
        self.rect.pos.x = if self.rect.pos.x.is_finite() {
            self.rect.pos.x.clamp(0.0, max_x)
        } else {
            0.0
        };
    }

    /// True when the paddle is against the wall it is steering into
    pub fn is_pinned(&self, arena_width: f32) -> bool {
        match self.direction {
            Direction::Left => self.rect.pos.x <= 0.0,
            Direction::Right => self.rect.pos.x >= self.max_x(arena_width),
            Direction::Neutral => false,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub circle: Circle,
    pub vel: Vec2,
    pub status: BodyStatus,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            id,
            circle: Circle::new(pos, radius),
            vel,
            status: BodyStatus::Active,
        }
    }

    /// Ball resting just above the paddle's center, moving at the launch velocity
    pub fn on_paddle(id: u32, paddle: &Paddle, tuning: &Tuning) -> Self {
        let r = tuning.ball_radius;
        let pos = Vec2::new(
            paddle.rect.center().x - r,
            paddle.rect.top() - 2.0 * r - 1.0,
        );
        Self::new(id, pos, r, tuning.ball_launch_velocity)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BodyStatus::Active
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.circle.pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.circle.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.circle.center()
    }

    pub fn bounds(&self) -> Rect {
        self.circle.bounds()
    }

    /// Move by `vel * dt`, bouncing off the left, right and top walls.
    ///
    /// A wall bounce clamps the ball to the wall and discards the rest of
    /// that axis's displacement. There is no bottom wall.
    pub fn advance(&mut self, dt: f32, arena: Vec2) {
        let dt = sanitize_dt(dt);
        let d = self.circle.diameter();
        let next = self.circle.pos + self.vel * dt;

        if next.x < 0.0 {
            self.circle.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if next.x + d > arena.x {
            self.circle.pos.x = arena.x - d;
            self.vel.x = -self.vel.x.abs();
        } else {
            self.circle.pos.x = next.x;
        }

        if next.y < 0.0 {
            self.circle.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
        } else {
            self.circle.pos.y = next.y;
        }
    }

    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Has the ball left through the bottom of the arena?
    #[inline]
    pub fn is_below(&self, arena_height: f32) -> bool {
        self.circle.pos.y > arena_height
    }

    /// Returns true if the ball was active before the call
    pub fn destroy(&mut self) -> bool {
        let was_active = self.is_active();
        self.status = BodyStatus::Destroyed;
        was_active
    }
}

/// Brick color tag (rendering hint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BrickColor {
    const CYCLE: [BrickColor; 6] = [
        BrickColor::Red,
        BrickColor::Orange,
        BrickColor::Yellow,
        BrickColor::Green,
        BrickColor::Blue,
        BrickColor::Purple,
    ];

    /// Deterministic per-row color
    pub fn for_row(row: usize) -> Self {
        Self::CYCLE[row % Self::CYCLE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickColor::Red => "red",
            BrickColor::Orange => "orange",
            BrickColor::Yellow => "yellow",
            BrickColor::Green => "green",
            BrickColor::Blue => "blue",
            BrickColor::Purple => "purple",
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    pub color: BrickColor,
    pub status: BodyStatus,
}

impl Brick {
    pub fn new(id: u32, rect: Rect, color: BrickColor) -> Self {
        Self {
            id,
            rect,
            color,
            status: BodyStatus::Active,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BodyStatus::Active
    }

    /// Returns true if the brick was active before the call
    pub fn destroy(&mut self) -> bool {
        let was_active = self.is_active();
        self.status = BodyStatus::Destroyed;
        was_active
    }
}
