//! Match state: the owner of every body in the arena
//!
//! A `Match` holds the paddle, balls and bricks plus score and lifecycle.
//! It is the only thing that mutates them; per-frame work is delegated to
//! [`super::tick::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{GridLayout, default_bricks};
use super::snapshot::MatchSnapshot;
use super::state::{Ball, Brick, Direction, Paddle};
use super::tick::{TickInput, tick};
use crate::tuning::{Result, Tuning, TuningError};

/// How an ended match finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Won,
    Lost,
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Active gameplay
    Running,
    /// No physics advances until resumed
    Paused,
    /// Absorbing terminal state
    Ended(MatchOutcome),
}

impl Lifecycle {
    #[inline]
    pub fn is_ended(&self) -> bool {
        matches!(self, Lifecycle::Ended(_))
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self {
            Lifecycle::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Arena size (width, height)
    pub(super) arena: Vec2,
    pub(super) tuning: Tuning,
    pub(super) paddle: Paddle,
    /// All balls ever spawned this match, destroyed ones included
    pub(super) balls: Vec<Ball>,
    /// All bricks of the level, destroyed ones included
    pub(super) bricks: Vec<Brick>,
    /// Layout restored on restart
    initial_bricks: Vec<Brick>,
    pub(super) score: i64,
    pub(super) active_bricks: usize,
    pub(super) active_balls: usize,
    pub(super) lifecycle: Lifecycle,
    /// Ticks simulated while running
    pub(super) ticks: u64,
    next_ball_id: u32,
}

impl Match {
    /// New match on the default brick grid
    ///
    /// The arena must be at least as wide as the grid, otherwise bricks past
    /// the right wall could never be cleared.
    pub fn new(width: f32, height: f32, tuning: Tuning) -> Result<Self> {
        let grid_width = GridLayout::default().row_width();
        if width < grid_width {
            return Err(TuningError::InvalidParameter(format!(
                "arena width {width} is narrower than the {grid_width} brick grid"
            )));
        }
        let bricks = default_bricks(width, 1);
        Self::with_layout(width, height, tuning, bricks)
    }

    /// New match with a caller-supplied brick layout
    pub fn with_layout(width: f32, height: f32, tuning: Tuning, bricks: Vec<Brick>) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(TuningError::InvalidParameter(format!(
                "arena must be positive, got {width}x{height}"
            )));
        }
        tuning.validate()?;

        let state = Self::assemble(Vec2::new(width, height), tuning, bricks);
        log::info!(
            "New {}x{} match with {} bricks",
            width,
            height,
            state.active_bricks
        );
        Ok(state)
    }

    fn assemble(arena: Vec2, tuning: Tuning, bricks: Vec<Brick>) -> Self {
        let paddle = Paddle::new(arena, &tuning);
        let mut state = Self {
            arena,
            paddle,
            balls: Vec::new(),
            bricks: bricks.clone(),
            initial_bricks: bricks,
            score: 0,
            active_bricks: 0,
            active_balls: 0,
            lifecycle: Lifecycle::Running,
            ticks: 0,
            next_ball_id: 1,
            tuning,
        };

        let ball = Ball::on_paddle(state.next_ball_id(), &state.paddle, &state.tuning);
        state.balls.push(ball);
        state.recount();
        state
    }

    /// Discard all entity state and start over in the same arena
    pub fn restart(&mut self) {
        let tuning = self.tuning.clone();
        let bricks = self.initial_bricks.clone();
        *self = Self::assemble(self.arena, tuning, bricks);
        log::info!("Match restarted");
    }

    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_ball_id;
        self.next_ball_id = self.next_ball_id.saturating_add(1);
        id
    }

    /// Recompute active counters from body statuses
    fn recount(&mut self) {
        self.active_balls = self.balls.iter().filter(|b| b.is_active()).count();
        self.active_bricks = self.bricks.iter().filter(|b| b.is_active()).count();
    }

    /// Advance one tick with the given steering
    pub fn tick(&mut self, direction: Direction, dt: f32) {
        tick(self, &TickInput::steer(direction), dt);
    }

    /// Advance one tick with full input (steering + pause toggle)
    pub fn step(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }

    pub fn toggle_pause(&mut self) {
        match self.lifecycle {
            Lifecycle::Running => self.pause(),
            Lifecycle::Paused => self.resume(),
            Lifecycle::Ended(_) => {}
        }
    }

    pub fn pause(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Paused;
            log::debug!("Paused at tick {}", self.ticks);
        }
    }

    pub fn resume(&mut self) {
        if self.lifecycle == Lifecycle::Paused {
            self.lifecycle = Lifecycle::Running;
            log::debug!("Resumed at tick {}", self.ticks);
        }
    }

    // === Scenario setup ===

    /// Add an active ball; returns its id
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, pos, self.tuning.ball_radius, vel));
        self.recount();
        id
    }

    /// Replace all balls (counters follow the new statuses)
    pub fn set_balls(&mut self, balls: Vec<Ball>) {
        self.next_ball_id = balls.iter().map(|b| b.id.saturating_add(1)).max().unwrap_or(1);
        self.balls = balls;
        self.recount();
    }

    /// Replace the current bricks without touching the restart layout
    pub fn set_bricks(&mut self, bricks: Vec<Brick>) {
        self.bricks = bricks;
        self.recount();
    }

    pub fn paddle_mut(&mut self) -> &mut Paddle {
        &mut self.paddle
    }

    // === Read access ===

    pub fn arena(&self) -> Vec2 {
        self.arena
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn active_bricks(&self) -> usize {
        self.active_bricks
    }

    pub fn active_balls(&self) -> usize {
        self.active_balls
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.lifecycle.is_ended()
    }

    /// Read-only view for renderers and evaluators
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(self)
    }
}
