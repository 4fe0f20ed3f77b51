//! tetris-sim - drive the engine headless
//!
//! Plays one game with pseudo-random inputs and reports the result.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::path::PathBuf;
use tetris_engine::{Action, Fault, Game, Settings, TickOutcome};

/// Inputs the simulated player picks from; `None` means no key this tick
const INPUTS: [Option<Action>; 8] = [
    Some(Action::MoveLeft),
    Some(Action::MoveRight),
    Some(Action::MoveDown),
    Some(Action::Drop),
    Some(Action::RotateLeft),
    Some(Action::RotateRight),
    None,
    None,
];

/// Play one headless game with random inputs and report the result.
#[derive(Debug, Parser)]
#[command(name = "tetris-sim", version)]
struct Args {
    /// Randomizer seed; overrides the settings file, drawn from entropy when neither is set
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Stop after this many fall ticks even if the game is still running
    #[arg(long, default_value_t = 2000, value_name = "N")]
    ticks: u64,

    /// Settings file to use instead of the platform config path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

/// Get the log directory, creating it if needed
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetris-engine");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Args::parse();
    let session_id: u32 = rand::random();

    // Setup tracing to log file
    let dir = log_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tetris_engine=debug".parse()?)
                .add_directive("tetris_sim=debug".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "tetris-sim starting, session={:08x}, log={}",
        session_id,
        dir.join(&log_file).display()
    );

    let mut settings = match &options.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if options.seed.is_some() {
        settings.gameplay.seed = options.seed;
    }
    let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
    tracing::info!("seed={} randomizer={:?}", seed, settings.randomizer);

    let mut game = Game::with_seed(&settings, seed)?;
    let gameplay = game.gameplay();
    tracing::info!(
        "board {}x{}, tick threshold {}, {} points per row",
        gameplay.height,
        gameplay.width,
        gameplay.tick_threshold,
        gameplay.points_per_row()
    );
    let mut player = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut ticks = 0;

    while ticks < options.ticks {
        if let Some(action) = INPUTS[player.gen_range(0..INPUTS.len())] {
            match game.process_action(action) {
                Ok(()) => {}
                Err(fault) if fault.is_rejected_input() => {}
                Err(fault) => return Err(fault.into()),
            }
        }

        ticks += 1;
        match game.tick() {
            Ok(TickOutcome::Landed { rows_cleared }) if rows_cleared > 0 => {
                tracing::info!("tick {}: cleared {} rows", ticks, rows_cleared);
            }
            Ok(_) => {}
            Err(Fault::GameOver) => break,
            Err(fault) => return Err(fault.into()),
        }
    }

    if options.json {
        println!("{}", game.snapshot().to_json()?);
    } else {
        let score = game.score();
        println!(
            "{:?} after {} ticks: score {} | lines {} | pieces {}",
            game.state(),
            ticks,
            score.points,
            score.lines,
            score.pieces
        );
    }
    tracing::info!("tetris-sim done after {} ticks", ticks);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tetris-sim"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.ticks, 2000);
        assert_eq!(args.config, None);
        assert!(!args.json);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "tetris-sim",
            "--seed",
            "7",
            "--ticks",
            "50",
            "--config",
            "sim.toml",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.ticks, 50);
        assert_eq!(args.config, Some(PathBuf::from("sim.toml")));
        assert!(args.json);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["tetris-sim", "--ticks", "many"]).is_err());
        assert!(Args::try_parse_from(["tetris-sim", "--speed", "3"]).is_err());
    }
}
