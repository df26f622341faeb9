//! Headless frame driver and policy evaluation
//!
//! The simulation never schedules itself. Something outside calls
//! [`Match::tick`] once per frame; this module provides two such callers:
//! - [`FixedStepDriver`]: turns variable wall-clock frame times into fixed ticks
//! - [`evaluate`]: runs a [`Policy`] against a match offline and scores it

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_GAP, MAX_STEPS_PER_FRAME, SIM_DT};
use crate::sanitize_dt;
use crate::sim::{BodyStatus, Direction, Match, MatchOutcome, MatchSnapshot, TickInput};

/// Fitness lost per simulated frame during evaluation
pub const FRAME_PENALTY: f64 = 0.1;

/// Something that chooses a paddle direction from what it can observe
pub trait Policy {
    fn act(&mut self, snapshot: &MatchSnapshot) -> Direction;
}

impl<F> Policy for F
where
    F: FnMut(&MatchSnapshot) -> Direction,
{
    fn act(&mut self, snapshot: &MatchSnapshot) -> Direction {
        self(snapshot)
    }
}

/// Keeps the paddle under the most threatening ball
#[derive(Debug, Clone, Copy)]
pub struct TrackingPolicy {
    /// Horizontal slack before the paddle reacts
    pub dead_zone: f32,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self { dead_zone: 8.0 }
    }
}

impl Policy for TrackingPolicy {
    fn act(&mut self, snapshot: &MatchSnapshot) -> Direction {
        // Lowest descending ball first, otherwise the lowest ball at all
        let target = snapshot
            .visible_balls()
            .filter(|b| b.vel.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .or_else(|| {
                snapshot
                    .visible_balls()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            });

        let Some(ball) = target else {
            return Direction::Neutral;
        };

        let paddle_center = snapshot.paddle.pos.x + snapshot.paddle.size.x / 2.0;
        let offset = ball.center().x - paddle_center;
        if offset > self.dead_zone {
            Direction::Right
        } else if offset < -self.dead_zone {
            Direction::Left
        } else {
            Direction::Neutral
        }
    }
}

/// Uniformly random steering from a seeded generator
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _snapshot: &MatchSnapshot) -> Direction {
        Direction::from_signal(self.rng.random_range(-1..=1))
    }
}

/// Turns variable frame times into a whole number of fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    pub step_dt: f32,
    pub max_steps: u32,
    accumulator: f32,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStepDriver {
    pub fn new(step_dt: f32) -> Self {
        Self {
            step_dt,
            max_steps: MAX_STEPS_PER_FRAME,
            accumulator: 0.0,
        }
    }

    /// Time banked toward the next tick
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's elapsed time; returns how many ticks ran.
    ///
    /// The pause toggle is one-shot and only goes to the first tick.
    pub fn advance(&mut self, state: &mut Match, frame_dt: f32, input: TickInput) -> u32 {
        let step_dt = sanitize_dt(self.step_dt);
        if step_dt == 0.0 {
            return 0;
        }

        self.accumulator += sanitize_dt(frame_dt).min(MAX_FRAME_GAP);

        let mut input = input;
        let mut steps = 0;
        while self.accumulator >= step_dt && steps < self.max_steps {
            state.step(&input, step_dt);
            self.accumulator -= step_dt;
            steps += 1;

            // Clear one-shot inputs after processing
            input.pause = false;
        }

        // Capped: drop the backlog instead of replaying it on later frames
        if self.accumulator >= step_dt {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }
}

/// Result of running a policy through a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i64,
    pub frames: u64,
    /// Score minus `FRAME_PENALTY` per frame
    pub fitness: f64,
    pub outcome: Option<MatchOutcome>,
    pub bricks_left: usize,
}

/// Let `policy` play `state` with a fixed `dt` until it ends or `max_frames` pass
pub fn evaluate<P: Policy + ?Sized>(
    state: &mut Match,
    policy: &mut P,
    dt: f32,
    max_frames: u64,
) -> Evaluation {
    let mut frames = 0;
    while state.is_running() && frames < max_frames {
        let snapshot = state.snapshot();
        let direction = policy.act(&snapshot);
        state.tick(direction, dt);
        frames += 1;
    }

    let bricks_left = state
        .bricks()
        .iter()
        .filter(|b| b.status == BodyStatus::Active)
        .count();
    let evaluation = Evaluation {
        score: state.score(),
        frames,
        fitness: state.score() as f64 - FRAME_PENALTY * frames as f64,
        outcome: state.lifecycle().outcome(),
        bricks_left,
    };
    log::info!(
        "Evaluation: score={} frames={} fitness={:.1} outcome={:?}",
        evaluation.score,
        evaluation.frames,
        evaluation.fitness,
        evaluation.outcome
    );
    evaluation
}
