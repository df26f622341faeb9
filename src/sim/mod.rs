//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time step only
//! - Stable iteration order (bodies are flagged, never removed)
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;
pub mod level;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Axis, Contact, Resolution, apply_english, resolve_brick, resolve_paddle};
pub use game::{Lifecycle, Match, MatchOutcome};
pub use level::{GridLayout, default_bricks};
pub use shape::{Circle, Rect, Shape};
pub use snapshot::{BallView, BrickView, MatchSnapshot, PaddleView};
pub use state::{Ball, BodyStatus, Brick, BrickColor, Direction, Paddle};
pub use tick::{FrameReport, TickInput, integrate_balls, tick};
