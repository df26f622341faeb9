//! Fixed-substep simulation tick
//!
//! Advances a match by one frame. Each ball's frame time is split into
//! `substeps` equal slices; every slice first scans bricks, then (if no
//! brick was hit) moves the ball and tests the paddle. A ball destroys at
//! most one brick per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{resolve_brick, resolve_paddle};
use super::game::{Lifecycle, Match, MatchOutcome};
use super::state::{Ball, Brick, Direction, Paddle};
use crate::sanitize_dt;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Paddle steering
    pub direction: Direction,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction,
            pause: false,
        }
    }
}

/// What happened to balls and bricks during one frame of integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub bricks_destroyed: u32,
    pub balls_lost: u32,
}

/// Move every active ball through one frame, resolving collisions per substep.
///
/// Balls already below the arena are destroyed before any motion and take
/// no further part in the frame.
pub fn integrate_balls(
    balls: &mut [Ball],
    bricks: &mut [Brick],
    paddle: &Paddle,
    arena: Vec2,
    dt: f32,
    tuning: &Tuning,
) -> FrameReport {
    let mut report = FrameReport::default();
    let substeps = tuning.substeps.max(1);
    let step_dt = dt / substeps as f32;

    for ball in balls.iter_mut().filter(|b| b.is_active()) {
        if ball.is_below(arena.y) {
            ball.destroy();
            report.balls_lost += 1;
            log::debug!("Ball {} lost", ball.id);
            continue;
        }

        let mut brick_hit = false;
        for _ in 0..substeps {
            if !brick_hit {
                brick_hit = bricks
                    .iter_mut()
                    .filter(|b| b.is_active())
                    .any(|brick| resolve_brick(ball, brick, tuning).is_hit());
                if brick_hit {
                    report.bricks_destroyed += 1;
                    continue;
                }
            }

            ball.advance(step_dt, arena);
            resolve_paddle(ball, paddle, arena.x, tuning);
        }
    }

    report
}

/// Advance the match by one tick
pub fn tick(state: &mut Match, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or ended
    if state.lifecycle != Lifecycle::Running {
        return;
    }

    let step = sanitize_dt(dt);
    if step == 0.0 {
        if dt != 0.0 {
            log::warn!("Ignoring tick with invalid dt {dt}");
        }
        return;
    }

    state.ticks += 1;

    let arena = state.arena;
    state.paddle.steer(input.direction, step, arena.x);

    let report = integrate_balls(
        &mut state.balls,
        &mut state.bricks,
        &state.paddle,
        arena,
        step,
        &state.tuning,
    );

    apply_report(state, &report);

    if state.active_balls == 0 {
        state.lifecycle = Lifecycle::Ended(MatchOutcome::Lost);
        log::info!(
            "Match lost after {} ticks, score {}",
            state.ticks,
            state.score
        );
        return;
    }

    state.score += state.tuning.tick_score;

    if state.active_bricks == 0 {
        state.score += state.tuning.clear_bonus;
        state.lifecycle = Lifecycle::Ended(MatchOutcome::Won);
        log::info!(
            "Match won after {} ticks, score {}",
            state.ticks,
            state.score
        );
    }
}

/// Fold a frame's destruction counts into counters and score
fn apply_report(state: &mut Match, report: &FrameReport) {
    let tuning = &state.tuning;

    state.active_bricks = state
        .active_bricks
        .saturating_sub(report.bricks_destroyed as usize);
    state.active_balls = state.active_balls.saturating_sub(report.balls_lost as usize);

    state.score += tuning.brick_score * report.bricks_destroyed as i64;
    if tuning.ball_loss_penalty_enabled {
        state.score -= tuning.ball_loss_penalty * report.balls_lost as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Rect;
    use crate::sim::state::{BodyStatus, BrickColor};

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    fn paddle() -> Paddle {
        Paddle::new(ARENA, &Tuning::default())
    }

    #[test]
    fn test_one_brick_per_ball_per_frame() {
        let tuning = Tuning::default();
        // Two bricks stacked so the ball overlaps both at once
        let mut bricks = vec![
            Brick::new(1, Rect::new(100.0, 100.0, 56.0, 30.0), BrickColor::Red),
            Brick::new(2, Rect::new(100.0, 130.0, 56.0, 30.0), BrickColor::Red),
        ];
        let mut balls = vec![Ball::new(1, Vec2::new(121.0, 124.0), 7.0, Vec2::new(0.0, -100.0))];

        let report = integrate_balls(&mut balls, &mut bricks, &paddle(), ARENA, 1.0 / 60.0, &tuning);
        assert_eq!(report.bricks_destroyed, 1);
        assert_eq!(bricks.iter().filter(|b| b.is_active()).count(), 1);
        // Fixed iteration order: the first brick goes
        assert_eq!(bricks[0].status, BodyStatus::Destroyed);
    }

    #[test]
    fn test_ball_below_arena_is_lost_before_motion() {
        let tuning = Tuning::default();
        let start = Vec2::new(300.0, ARENA.y + 1.0);
        let mut balls = vec![Ball::new(1, start, 7.0, Vec2::new(0.0, -500.0))];

        let report = integrate_balls(&mut balls, &mut [], &paddle(), ARENA, 1.0 / 60.0, &tuning);
        assert_eq!(report.balls_lost, 1);
        assert_eq!(balls[0].status, BodyStatus::Destroyed);
        assert_eq!(balls[0].pos(), start);
    }

    #[test]
    fn test_destroyed_ball_does_not_move() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(1, Vec2::new(300.0, 300.0), 7.0, Vec2::new(100.0, 100.0));
        ball.destroy();
        let mut balls = vec![ball.clone()];

        let report = integrate_balls(&mut balls, &mut [], &paddle(), ARENA, 0.5, &tuning);
        assert_eq!(report, FrameReport::default());
        assert_eq!(balls[0], ball);
    }

    #[test]
    fn test_substeps_split_motion() {
        let tuning = Tuning::default();
        let mut balls = vec![Ball::new(1, Vec2::new(300.0, 300.0), 7.0, Vec2::new(90.0, -60.0))];

        integrate_balls(&mut balls, &mut [], &paddle(), ARENA, 1.0, &tuning);
        assert!((balls[0].pos().x - 390.0).abs() < 0.001);
        assert!((balls[0].pos().y - 240.0).abs() < 0.001);
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_thin_brick() {
        let tuning = Tuning::default();
        // Thin brick directly in the path of a fast rising ball
        let mut bricks = vec![Brick::new(1, Rect::new(280.0, 290.0, 56.0, 4.0), BrickColor::Red)];
        let mut ball = Ball::new(1, Vec2::new(300.0, 300.0), 7.0, Vec2::new(0.0, -400.0));
        let mut hit = false;

        for _ in 0..10 {
            let mut balls = [ball.clone()];
            let report =
                integrate_balls(&mut balls, &mut bricks, &paddle(), ARENA, 1.0 / 60.0, &tuning);
            ball = balls[0].clone();
            if report.bricks_destroyed > 0 {
                hit = true;
                break;
            }
        }

        assert!(hit);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_ball_bounces_off_paddle() {
        let tuning = Tuning::default();
        let paddle = paddle();
        let start = Vec2::new(paddle.rect.center().x - 7.0, paddle.rect.top() - 15.0);
        let mut balls = vec![Ball::new(1, start, 7.0, Vec2::new(0.0, 300.0))];

        integrate_balls(&mut balls, &mut [], &paddle, ARENA, 1.0 / 60.0, &tuning);
        assert!(balls[0].vel.y < 0.0);
        assert!(balls[0].bounds().bottom() <= paddle.rect.top());
    }
}
