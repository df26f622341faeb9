//! Brick Breaker headless runner
//!
//! Plays one match with a built-in policy at a fixed timestep and reports
//! the result. Useful for checking tunings and policy fitness offline.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use brick_breaker::consts::{ARENA_HEIGHT, ARENA_WIDTH, SIM_DT};
use brick_breaker::{Match, RandomPolicy, TrackingPolicy, Tuning, evaluate};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Follow the lowest descending ball
    Tracking,
    /// Seeded random steering
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Arena width
    #[arg(long, default_value_t = ARENA_WIDTH)]
    width: f32,

    /// Arena height
    #[arg(long, default_value_t = ARENA_HEIGHT)]
    height: f32,

    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Policy that steers the paddle
    #[arg(long, value_enum, default_value_t = PolicyKind::Tracking)]
    policy: PolicyKind,

    /// Seed for the random policy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many ticks even if the match is still running
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut state = Match::new(args.width, args.height, tuning).context("creating match")?;
    log::info!("Running {:?} policy for up to {} ticks", args.policy, args.max_ticks);

    let result = match args.policy {
        PolicyKind::Tracking => {
            evaluate(&mut state, &mut TrackingPolicy::default(), SIM_DT, args.max_ticks)
        }
        PolicyKind::Random => {
            evaluate(&mut state, &mut RandomPolicy::new(args.seed), SIM_DT, args.max_ticks)
        }
    };

    if args.json {
        println!("{}", state.snapshot().to_json()?);
    } else {
        let outcome = result
            .outcome
            .map(|o| format!("{o:?}"))
            .unwrap_or_else(|| "Unfinished".to_string());
        println!(
            "{outcome}: score {} in {} frames (fitness {:.1}, {} bricks left)",
            result.score, result.frames, result.fitness, result.bricks_left
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_max_ticks_flag() {
        let args = Args::try_parse_from(["brick-breaker", "--max-ticks", "10"]).unwrap();
        assert_eq!(args.max_ticks, 10);
        assert!(Args::try_parse_from(["brick-breaker", "--max-frames", "10"]).is_err());
    }
}
