//! Command-line interface for memory_match.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::game::Difficulty;

/// Memory Match - flip cards two at a time and find every pair
#[derive(Parser, Debug)]
#[command(name = "memory_match")]
#[command(about = "Terminal memory match card game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "memory_match.toml")]
    pub config: PathBuf,

    /// Path to the database file (overrides the config file and MEMORY_MATCH_DB)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run; defaults to `play`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the game menu
    Play,

    /// Jump straight into today's daily challenge
    Daily,

    /// Print per-board-size statistics
    Stats,

    /// Print the leaderboard for one board size
    Leaderboard {
        /// Board size (easy, medium, hard, expert)
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
    },

    /// Delete all statistics
    ResetStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["memory_match"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("memory_match.toml"));
    }

    #[test]
    fn leaderboard_parses_difficulty() {
        let cli =
            Cli::try_parse_from(["memory_match", "leaderboard", "--difficulty", "expert"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Leaderboard {
                difficulty: Difficulty::Expert
            })
        ));
    }

    #[test]
    fn global_db_path_after_subcommand() {
        let cli = Cli::try_parse_from(["memory_match", "stats", "--db-path", "x.db"]).unwrap();
        assert_eq!(cli.db_path.as_deref(), Some("x.db"));
    }

    #[test]
    fn unknown_difficulty_rejected() {
        assert!(
            Cli::try_parse_from(["memory_match", "leaderboard", "-d", "impossible"]).is_err()
        );
    }
}
