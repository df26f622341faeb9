//! Read-only view of a match for renderers and automated players
//!
//! Destroyed bodies are kept so indices stay stable; consumers filter on
//! `status` (see [`MatchSnapshot::visible_balls`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::game::{Lifecycle, Match};
use super::state::{BodyStatus, BrickColor, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    /// Top-left of the bounding square
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub status: BodyStatus,
}

impl BallView {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: BrickColor,
    pub status: BodyStatus,
}

/// Everything an outside observer may see of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub arena: Vec2,
    pub paddle: PaddleView,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BrickView>,
    pub score: i64,
    pub active_bricks: usize,
    pub active_balls: usize,
    pub lifecycle: Lifecycle,
    pub ticks: u64,
}

impl MatchSnapshot {
    pub fn capture(state: &Match) -> Self {
        let paddle = state.paddle();
        Self {
            arena: state.arena(),
            paddle: PaddleView {
                pos: paddle.rect.pos,
                size: paddle.rect.size,
                direction: paddle.direction,
            },
            balls: state
                .balls()
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    pos: b.pos(),
                    radius: b.radius(),
                    vel: b.vel,
                    status: b.status,
                })
                .collect(),
            bricks: state
                .bricks()
                .iter()
                .map(|b| BrickView {
                    id: b.id,
                    pos: b.rect.pos,
                    size: b.rect.size,
                    color: b.color,
                    status: b.status,
                })
                .collect(),
            score: state.score(),
            active_bricks: state.active_bricks(),
            active_balls: state.active_balls(),
            lifecycle: state.lifecycle(),
            ticks: state.ticks(),
        }
    }

    /// Balls a renderer should draw
    pub fn visible_balls(&self) -> impl Iterator<Item = &BallView> {
        self.balls.iter().filter(|b| b.status == BodyStatus::Active)
    }

    /// Bricks a renderer should draw
    pub fn visible_bricks(&self) -> impl Iterator<Item = &BrickView> {
        self.bricks.iter().filter(|b| b.status == BodyStatus::Active)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_match() {
        let state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.bricks.len(), 48);
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.paddle.pos, state.paddle().rect.pos);
        assert_eq!(snap.lifecycle, Lifecycle::Running);
        assert_eq!(snap.visible_balls().count(), 1);
    }

    #[test]
    fn test_destroyed_bodies_stay_listed_but_hidden() {
        let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
        state.spawn_ball(Vec2::new(300.0, 700.0), Vec2::ZERO);
        state.tick(Direction::Neutral, SIM_DT);

        let snap = state.snapshot();
        assert_eq!(snap.balls.len(), 2);
        assert_eq!(snap.visible_balls().count(), 1);
        assert_eq!(snap.active_balls, 1);
    }

    #[test]
    fn test_snapshot_json() {
        let state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
        let json = state.snapshot().to_json().unwrap();
        let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 0);
        assert_eq!(back.bricks.len(), 48);
        assert!(json.contains("\"Running\""));
    }
}
