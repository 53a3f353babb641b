//! Memory Match - Unified CLI
//!
//! Terminal card-matching game with statistics, leaderboard and a daily
//! challenge.

#![warn(missing_docs)]

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use memory_match::{
    AppConfig, Cli, Command, Database, Difficulty, GameService, LEADERBOARD_SIZE, Repositories,
    ScreenTransition, format_time, run_tui,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?.with_db_path_override(cli.db_path);

    initialize_tracing(&config)?;
    info!(db_path = %config.db_path(), "Starting Memory Match");

    let database = Database::open(config.db_path().clone())
        .with_context(|| format!("Failed to open database {}", config.db_path()))?;
    let service = GameService::new(Repositories::open(database)?);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(service, ScreenTransition::GoToMainMenu).await,
        Command::Daily => run_tui(service, ScreenTransition::StartDaily).await,
        Command::Stats => print_stats(&service),
        Command::Leaderboard { difficulty } => print_leaderboard(&service, difficulty),
        Command::ResetStats => reset_stats(&service),
    }
}

/// Sends tracing output to the configured log file so it stays out of the TUI.
fn initialize_tracing(config: &AppConfig) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())
        .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Print per-board-size statistics
#[instrument(skip(service))]
fn print_stats(service: &GameService) -> Result<()> {
    println!(
        "{:<16} {:>7} {:>8} {:>6} {:>7} {:>7} {:>6}",
        "Board", "Played", "Cleared", "Rate", "Best", "Time", "Moves"
    );
    for difficulty in Difficulty::iter() {
        let stats = service
            .repositories()
            .stats
            .get_stats(difficulty.pair_count())?;
        println!(
            "{:<16} {:>7} {:>8} {:>5.0}% {:>7} {:>7} {:>6}",
            format!("{} ({})", difficulty.label(), difficulty.pair_count()),
            stats.games_played(),
            stats.games_completed(),
            stats.completion_rate(),
            stats.best_score(),
            (*stats.best_time())
                .map(|t| format_time(t.max(0) as u64))
                .unwrap_or_else(|| "-".to_string()),
            (*stats.best_moves())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}

/// Print the top scores for one board size
#[instrument(skip(service))]
fn print_leaderboard(service: &GameService, difficulty: Difficulty) -> Result<()> {
    let entries = service
        .repositories()
        .leaderboard
        .top(difficulty.pair_count(), LEADERBOARD_SIZE)?;

    println!(
        "Leaderboard - {} ({} pairs)",
        difficulty.label(),
        difficulty.pair_count()
    );
    if entries.is_empty() {
        println!("No scores yet.");
        return Ok(());
    }
    println!(
        "{:>3} {:<16} {:>7} {:>7} {:>6}  {}",
        "#", "Player", "Score", "Time", "Moves", "Date"
    );
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>3} {:<16} {:>7} {:>7} {:>6}  {}",
            rank + 1,
            entry.player_name(),
            entry.score(),
            format_time((*entry.time_seconds()).max(0) as u64),
            entry.moves(),
            entry.played_at().format("%Y-%m-%d"),
        );
    }
    Ok(())
}

/// Delete all statistics
#[instrument(skip(service))]
fn reset_stats(service: &GameService) -> Result<()> {
    service.repositories().stats.reset()?;
    info!("Statistics reset");
    println!("Statistics reset.");
    Ok(())
}
