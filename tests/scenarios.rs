//! End-to-end match scenarios driven through the public API

use brick_breaker::consts::SIM_DT;
use brick_breaker::sim::{Ball, BodyStatus, Brick, BrickColor, Rect};
use brick_breaker::{Direction, Lifecycle, Match, MatchOutcome, Tuning};
use glam::Vec2;

fn single_brick_match() -> Match {
    let brick = Brick::new(1, Rect::new(100.0, 100.0, 56.0, 30.0), BrickColor::Red);
    Match::with_layout(800.0, 600.0, Tuning::default(), vec![brick]).unwrap()
}

#[test]
fn single_brick_break() {
    let mut state = single_brick_match();
    let radius = state.tuning().ball_radius;
    state.set_balls(vec![Ball::new(
        1,
        Vec2::new(100.0, 115.0),
        radius,
        Vec2::new(50.0, 0.0),
    )]);

    state.tick(Direction::Neutral, 1.0);

    let brick = &state.bricks()[0];
    let ball = &state.balls()[0];
    assert_eq!(brick.status, BodyStatus::Destroyed);
    assert!(ball.vel.x < 0.0);
    assert!(!ball.bounds().overlaps(&brick.rect));
    assert_eq!(state.active_bricks(), 0);
    // brick + survived tick + level clear
    assert_eq!(state.score(), 100 + 1 + 1000);
    assert_eq!(state.lifecycle(), Lifecycle::Ended(MatchOutcome::Won));
}

#[test]
fn brick_hit_without_clear_scores_100_plus_tick() {
    let far = Brick::new(2, Rect::new(600.0, 100.0, 56.0, 30.0), BrickColor::Red);
    let near = Brick::new(1, Rect::new(100.0, 100.0, 56.0, 30.0), BrickColor::Red);
    let mut state = Match::with_layout(800.0, 600.0, Tuning::default(), vec![near, far]).unwrap();
    let radius = state.tuning().ball_radius;
    state.set_balls(vec![Ball::new(
        1,
        Vec2::new(100.0, 115.0),
        radius,
        Vec2::new(50.0, 0.0),
    )]);

    state.tick(Direction::Neutral, 1.0);

    assert_eq!(state.score(), 101);
    assert_eq!(state.active_bricks(), 1);
    assert_eq!(state.lifecycle(), Lifecycle::Running);
}

#[test]
fn loss_condition() {
    let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
    let radius = state.tuning().ball_radius;
    state.set_balls(vec![Ball::new(
        1,
        Vec2::new(400.0, 601.0),
        radius,
        Vec2::new(0.0, 100.0),
    )]);

    state.tick(Direction::Neutral, SIM_DT);

    assert_eq!(state.active_balls(), 0);
    assert_eq!(state.lifecycle(), Lifecycle::Ended(MatchOutcome::Lost));
    assert_eq!(state.score(), 0);
}

#[test]
fn loss_penalty_when_enabled() {
    let tuning = Tuning {
        ball_loss_penalty_enabled: true,
        ..Default::default()
    };
    let mut state = Match::new(800.0, 600.0, tuning).unwrap();
    state.spawn_ball(Vec2::new(300.0, 650.0), Vec2::ZERO);

    state.tick(Direction::Neutral, SIM_DT);

    assert_eq!(state.active_balls(), 1);
    assert_eq!(state.score(), -500 + 1);
    assert!(state.is_running());
}

/// Post-bounce horizontal speed for a ball dropping onto the paddle center
fn english_after_bounce(direction: Direction) -> f32 {
    let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
    let paddle_top = state.paddle().rect.top();
    let radius = state.tuning().ball_radius;
    state.set_balls(vec![Ball::new(
        1,
        Vec2::new(400.0 - radius, paddle_top - 2.0 * radius - 1.0),
        radius,
        Vec2::new(0.0, 300.0),
    )]);

    state.tick(direction, SIM_DT);

    let ball = &state.balls()[0];
    assert!(ball.vel.y < 0.0, "ball should have bounced");
    ball.vel.x
}

#[test]
fn paddle_english() {
    let left = english_after_bounce(Direction::Left);
    let right = english_after_bounce(Direction::Right);
    let neutral = english_after_bounce(Direction::Neutral);

    assert_ne!(left, right);
    assert!(left < 0.0 && right > 0.0);
    assert_eq!(neutral, 0.0);
    for vx in [left, right] {
        assert!((-400.0..=400.0).contains(&vx));
    }
}

#[test]
fn terminal_state_absorbs_ticks() {
    let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
    state.set_balls(Vec::new());
    state.tick(Direction::Neutral, SIM_DT);
    assert!(state.is_ended());

    let frozen = state.snapshot();
    for direction in [Direction::Left, Direction::Right, Direction::Neutral] {
        state.tick(direction, SIM_DT);
        state.tick(direction, 1.0);
    }
    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn identical_inputs_give_identical_runs() {
    let script: Vec<Direction> = (0..900)
        .map(|i| match (i / 37) % 3 {
            0 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::Neutral,
        })
        .collect();

    let run = || {
        let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
        for &direction in &script {
            state.tick(direction, SIM_DT);
        }
        state.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn default_match_plays_out() {
    let mut state = Match::new(800.0, 600.0, Tuning::default()).unwrap();
    let start_bricks = state.active_bricks();

    let mut frames = 0;
    while state.is_running() && frames < 20_000 {
        let ball_x = state.balls()[0].center().x;
        let paddle_x = state.paddle().rect.center().x;
        let direction = if ball_x > paddle_x + 5.0 {
            Direction::Right
        } else if ball_x < paddle_x - 5.0 {
            Direction::Left
        } else {
            Direction::Neutral
        };
        state.tick(direction, SIM_DT);
        frames += 1;
    }

    assert!(state.active_bricks() < start_bricks);
    assert!(state.bricks().len() == start_bricks, "bricks are flagged, never removed");
}
