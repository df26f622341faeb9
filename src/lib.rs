//! Brick Breaker - a deterministic paddle/ball/brick arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, substeps, match state)
//! - `tuning`: Data-driven game balance
//! - `driver`: Headless frame driver and policy evaluation
//!
//! Rendering and input capture live outside this crate; they read
//! [`sim::MatchSnapshot`] and feed a [`sim::Direction`] per tick.

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::{Evaluation, FixedStepDriver, Policy, RandomPolicy, TrackingPolicy, evaluate};
pub use sim::{Direction, Lifecycle, Match, MatchOutcome, MatchSnapshot, TickInput};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed driver timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum fixed steps per driver frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 8;
    /// Longest frame gap the driver will simulate (seconds)
    pub const MAX_FRAME_GAP: f32 = 0.1;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Collision substeps per tick
    pub const SUBSTEPS: u32 = 3;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_LAUNCH_VX: f32 = 150.0;
    pub const BALL_LAUNCH_VY: f32 = -250.0;
    /// Cap on horizontal ball speed after paddle English
    pub const BALL_MAX_SPEED: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_MAX_SPEED: f32 = 450.0;
    /// Distance from the arena bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_MARGIN: f32 = 40.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_COLUMNS: usize = 12;
    pub const BRICK_WIDTH: f32 = 56.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_GAP: f32 = 8.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;

    /// Scoring
    pub const BRICK_SCORE: i64 = 100;
    pub const CLEAR_BONUS: i64 = 1000;
    pub const TICK_SCORE: i64 = 1;
    pub const BALL_LOSS_PENALTY: i64 = 500;

    /// Collision response
    pub const AXIS_BIAS: f32 = 0.1;
    pub const ENGLISH_FACTOR: f32 = 0.7;
    pub const BRICK_CLEARANCE_X: f32 = 5.0;
    pub const BRICK_CLEARANCE_Y: f32 = 10.0;
}

/// Sign of `value` treating zero as positive.
///
/// Collision math needs a push direction even when two centers coincide.
#[inline]
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Normalize a tick duration: NaN, infinite and non-positive values become zero
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
