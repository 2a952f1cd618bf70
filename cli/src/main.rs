use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweepr_core::{CellCount, Coord, Coord2, Difficulty, GameConfig};

use crate::autoplay::{GameSetup, play_game};
use crate::store::StatsStore;

mod autoplay;
mod render;
mod stats;
mod store;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    /// Where statistics are kept
    #[arg(
        long,
        global = true,
        env = "SWEEPR_STATS_FILE",
        default_value = "sweepr_stats.json"
    )]
    stats_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the solver play one or more games
    Play(PlayArgs),
    /// Show lifetime statistics
    Stats {
        /// Clear all statistics
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// Board preset, `custom` needs --width, --height and --mines
    #[arg(short, long, default_value = "beginner", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    #[arg(long, required_if_eq("difficulty", "custom"))]
    width: Option<Coord>,

    #[arg(long, required_if_eq("difficulty", "custom"))]
    height: Option<Coord>,

    #[arg(long, required_if_eq("difficulty", "custom"))]
    mines: Option<CellCount>,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// First cell to open, as `X,Y`
    #[arg(long, value_parser = parse_coords)]
    first_click: Option<Coord2>,

    /// Pause between solver moves
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print the board after every move
    #[arg(long)]
    show_board: bool,

    /// Do not read or update the statistics file
    #[arg(long)]
    no_stats: bool,
}

impl PlayArgs {
    fn config(&self) -> Result<GameConfig> {
        let custom = (self.width, self.height, self.mines);
        let Some(preset) = self.difficulty.config() else {
            let (Some(width), Some(height), Some(mines)) = custom else {
                bail!("A custom board needs --width, --height and --mines");
            };
            let config = GameConfig::new((width, height), mines);
            if config != GameConfig::new_unchecked((width, height), mines) {
                log::warn!(
                    "Board adjusted to {}x{} with {} mines",
                    config.size.0,
                    config.size.1,
                    config.mines
                );
            }
            return Ok(config);
        };

        if custom != (None, None, None) {
            bail!("--width, --height and --mines need --difficulty custom");
        }
        Ok(preset)
    }
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::ALL
        .into_iter()
        .find(|difficulty| difficulty.label().eq_ignore_ascii_case(value))
        .ok_or_else(|| "expected one of beginner, intermediate, expert, custom".to_string())
}

fn parse_coords(value: &str) -> Result<Coord2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| "expected X,Y".to_string())?;
    let parse = |part: &str| part.trim().parse::<Coord>().map_err(|err| err.to_string());
    Ok((parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Play(play) => run_play(&play, args.stats_file),
        Command::Stats { reset } => run_stats(reset, args.stats_file),
    }
}

fn run_play(play: &PlayArgs, stats_file: PathBuf) -> Result<()> {
    let setup = GameSetup {
        difficulty: play.difficulty,
        config: play.config()?,
        first_click: play.first_click,
        delay: Duration::from_millis(play.delay_ms),
        show_board: play.show_board,
    };
    let seed = play.seed.unwrap_or_else(rand::random);
    log::info!("Session seed: {seed}");

    let mut seeds = SmallRng::seed_from_u64(seed);
    let mut store = (!play.no_stats).then(|| StatsStore::load(stats_file));
    let mut won = 0;

    for game in 1..=play.games {
        let (board_seed, solver_seed) = (seeds.random(), seeds.random());
        log::info!("Game {game}: board seed {board_seed}, solver seed {solver_seed}");

        let report = play_game(&setup, board_seed, solver_seed)?;
        let record = report.record;
        if record.won {
            won += 1;
        }
        println!(
            "Game {game}/{}: {} ({}) in {:.3?}, {} moves, {} guesses",
            play.games,
            if record.won { "won" } else { "lost" },
            record.difficulty,
            record.elapsed,
            report.moves,
            report.guesses,
        );
        if let Some(store) = store.as_mut() {
            store.record(record)?;
        }
    }

    println!("Won {won} of {} games", play.games);
    if let Some(store) = &store {
        println!("\n{}", store.stats());
    }
    Ok(())
}

fn run_stats(reset: bool, stats_file: PathBuf) -> Result<()> {
    let mut store = StatsStore::load(stats_file);
    if reset {
        store.reset()?;
        println!("Statistics reset ({})", store.path().display());
    } else {
        println!("{}", store.stats());
    }
    Ok(())
}
