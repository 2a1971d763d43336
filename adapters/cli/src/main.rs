#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless snake session end to end.
//!
//! The binary loads the board configuration, drives a full game through the
//! session loop, persists the finished record, and prints the leaderboards
//! derived from whatever the store returns. With `--offline` every store call
//! fails and the run degrades to a local-only report.

mod config;
mod session;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use snake_arcade_core::{Difficulty, DifficultyProfile, PlayerId, ScoreRecord};
use snake_arcade_storage::{
    archive::ScoreArchive, MemoryStore, OfflineStore, ScoreStore, StoreError,
};
use snake_arcade_system_leaderboard as leaderboard;

/// Rows shown per leaderboard table.
const LEADERBOARD_LIMIT: usize = 10;

/// Command-line arguments for a headless run.
#[derive(Parser)]
#[command(name = "snake-arcade")]
#[command(version, about = "Headless snake arcade session with leaderboards")]
struct Cli {
    /// Difficulty preset controlling speed and scoring.
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Stable identifier the score is recorded under.
    #[arg(long, default_value = "player-1")]
    player: String,

    /// Display name shown on leaderboards; defaults to the player id.
    #[arg(long)]
    name: Option<String>,

    /// Avatar reference attached to the persisted record.
    #[arg(long, default_value = "avatars/default.png")]
    avatar: String,

    /// Seed for the food spawner; equal seeds replay equal sessions.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Upper bound on simulation ticks before the session is cut off.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Optional TOML file overriding the board dimensions.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat the score store as unreachable.
    #[arg(long)]
    offline: bool,

    /// Print the portable score archive string after the run.
    #[arg(long)]
    export: bool,
}

/// Difficulty presets as they appear on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    /// Slow snake, plain scores.
    Easy,
    /// Default pace with a 1.5x multiplier.
    Medium,
    /// Fast snake, 2.5x multiplier.
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Entry point for the snake arcade command-line interface.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load(cli.config.as_deref())?;
    let grid = config.geometry().grid_size();
    anyhow::ensure!(
        grid.columns() > 0 && grid.rows() > 0,
        "configured board is smaller than a single cell"
    );

    let difficulty = Difficulty::from(cli.difficulty);
    let profile = DifficultyProfile::for_difficulty(difficulty);
    println!(
        "{} session on a {}x{} grid, one tick every {}ms",
        difficulty.display_name(),
        grid.columns(),
        grid.rows(),
        profile.tick_interval().as_millis()
    );

    let mut deck = session::TriviaDeck::canned();
    let outcome = session::run(profile, grid, cli.seed, cli.max_ticks, &mut deck);

    let final_score = profile.final_score(outcome.base_score);
    println!(
        "run over after {} ticks ({}): length {}, {} bonus questions answered",
        outcome.ticks,
        session::describe_cause(outcome.cause),
        outcome.snake_length,
        outcome.questions_answered
    );
    println!(
        "base score {} x{} multiplier = {}",
        outcome.base_score,
        difficulty.score_multiplier(),
        final_score
    );

    let player = PlayerId::new(cli.player.clone());
    let display_name = cli.name.unwrap_or_else(|| cli.player.clone());
    let record = ScoreRecord::new(
        player.clone(),
        display_name,
        cli.avatar,
        final_score,
        difficulty,
        epoch_millis(),
    );

    let mut store: Box<dyn ScoreStore> = if cli.offline {
        Box::new(OfflineStore)
    } else {
        Box::new(MemoryStore::new())
    };

    if let Err(StoreError::Unavailable(reason)) = store.save_score(&record) {
        eprintln!("score not persisted ({reason}); continuing with local results only");
    }

    let records = match store.fetch_records(None) {
        Ok(records) => records,
        Err(StoreError::Unavailable(reason)) => {
            eprintln!("leaderboard unavailable ({reason}); showing this run only");
            vec![record.clone()]
        }
    };

    print_leaderboards(&player, difficulty, &records);

    if cli.export {
        let archive = ScoreArchive::new(records);
        println!("archive: {}", archive.encode());
    }

    Ok(())
}

/// Prints the per-difficulty table, the cross-difficulty table, and the
/// current player's rank.
fn print_leaderboards(player: &PlayerId, difficulty: Difficulty, records: &[ScoreRecord]) {
    println!("-- {} leaderboard --", difficulty.display_name());
    let bucket = leaderboard::per_difficulty(records, difficulty, LEADERBOARD_LIMIT);
    for (index, entry) in bucket.iter().enumerate() {
        println!("{:>2}. {:<16} {}", index + 1, entry.display_name, entry.score);
    }

    println!("-- global best per player --");
    for (index, entry) in leaderboard::global(records, LEADERBOARD_LIMIT)
        .iter()
        .enumerate()
    {
        println!(
            "{:>2}. {:<16} {} ({})",
            index + 1,
            entry.best.display_name,
            entry.best.score,
            entry.best.difficulty.display_name()
        );
    }

    let history = leaderboard::player_history(player, records, 5);
    if !history.is_empty() {
        println!("-- recent best runs for {} --", player.get());
        for record in &history {
            println!(
                "    {} on {}",
                record.score,
                record.difficulty.display_name()
            );
        }
    }

    match leaderboard::rank_of(player, difficulty, records) {
        Some(rank) => println!(
            "{} holds rank {} on {}",
            player.get(),
            rank,
            difficulty.display_name()
        ),
        None => println!("{} has no ranked score on {}", player.get(), difficulty.display_name()),
    }
}

/// Milliseconds since the Unix epoch, saturating at zero on clock skew.
fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
