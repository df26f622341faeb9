//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so that a match can be
//! rebalanced from a JSON file without recompiling. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, TuningError>;

/// Gameplay constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Collision substeps per tick
    pub substeps: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity given to the ball at match start (units/sec)
    pub ball_launch_velocity: Vec2,
    /// Cap on horizontal speed after paddle English
    pub max_ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_max_speed: f32,
    /// Gap between the paddle's top edge and the arena bottom
    pub paddle_bottom_margin: f32,

    // === Scoring ===
    pub brick_score: i64,
    pub clear_bonus: i64,
    /// Awarded for every tick that does not end in a loss
    pub tick_score: i64,
    pub ball_loss_penalty: i64,
    pub ball_loss_penalty_enabled: bool,

    // === Collision response ===
    /// Added to the X penetration before comparing axes (corner hits go vertical)
    pub axis_bias: f32,
    /// Fraction of paddle speed transferred as English
    pub english_factor: f32,
    /// Extra push beyond exact separation after a brick hit
    pub brick_clearance: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            substeps: SUBSTEPS,

            ball_radius: BALL_RADIUS,
            ball_launch_velocity: Vec2::new(BALL_LAUNCH_VX, BALL_LAUNCH_VY),
            max_ball_speed: BALL_MAX_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_max_speed: PADDLE_MAX_SPEED,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            brick_score: BRICK_SCORE,
            clear_bonus: CLEAR_BONUS,
            tick_score: TICK_SCORE,
            ball_loss_penalty: BALL_LOSS_PENALTY,
            ball_loss_penalty_enabled: false,

            axis_bias: AXIS_BIAS,
            english_factor: ENGLISH_FACTOR,
            brick_clearance: Vec2::new(BRICK_CLEARANCE_X, BRICK_CLEARANCE_Y),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.substeps == 0 {
            return Err(invalid("substeps must be at least 1"));
        }
        positive("ball_radius", self.ball_radius)?;
        positive("max_ball_speed", self.max_ball_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_max_speed", self.paddle_max_speed)?;
        non_negative("paddle_bottom_margin", self.paddle_bottom_margin)?;
        non_negative("axis_bias", self.axis_bias)?;
        non_negative("english_factor", self.english_factor)?;
        non_negative("brick_clearance.x", self.brick_clearance.x)?;
        non_negative("brick_clearance.y", self.brick_clearance.y)?;
        if !self.ball_launch_velocity.is_finite() {
            return Err(invalid("ball_launch_velocity must be finite"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> TuningError {
    TuningError::InvalidParameter(msg.into())
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().substeps, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "substeps": 5, "ball_loss_penalty_enabled": true }"#)
            .unwrap();
        assert_eq!(tuning.substeps, 5);
        assert!(tuning.ball_loss_penalty_enabled);
        assert_eq!(tuning.brick_score, BRICK_SCORE);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_zero_substeps_rejected() {
        let err = Tuning::from_json(r#"{ "substeps": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvalidParameter(_)));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = Tuning::from_json(r#"{ "paddle_width": -10.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvalidParameter(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ substeps: ").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.english_factor = 0.5;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/brick-breaker/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
