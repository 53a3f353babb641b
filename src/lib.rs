//! Memory Match library - a terminal card-matching game with persistence
//!
//! Flip cards two at a time and find every pair. Finished games feed
//! per-board-size statistics, a leaderboard and a daily challenge, all
//! stored in SQLite.
//!
//! # Architecture
//!
//! - **Game**: pure engine (deck, board, scoring, timers)
//! - **Session**: a board in play with its clock and mismatch delay
//! - **Db**: diesel models and one DAO per table
//! - **Repository**: DAOs plus watch channels that publish read models
//! - **Service**: bookkeeping for finished and interrupted games
//! - **Tui**: ratatui front end
//!
//! # Example
//!
//! ```no_run
//! use memory_match::{Database, GameService, GameSession, Repositories};
//!
//! # fn example() -> Result<(), memory_match::DbError> {
//! let database = Database::open("memory_match.db".to_string())?;
//! let service = GameService::new(Repositories::open(database)?);
//!
//! let mut session = GameSession::start(*service.settings().difficulty(), false);
//! session.flip(0).ok();
//! service.save_progress(&session)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod db;
mod game;
mod game_service;
mod repository;
mod session;
mod tui;

// Crate-level exports - Command line and configuration
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError, DB_PATH_ENV};

// Crate-level exports - Game engine
pub use game::{
    CRITICAL_SECS, Card, CardState, Countdown, Deck, Difficulty, FlipOutcome, GameError,
    GameSnapshot, GameTimer, MOVE_BONUS_PER_MOVE, MatchGame, PAR_SECONDS_PER_PAIR, POINTS_PER_PAIR,
    Phase, ScoreBreakdown, SeededRng, TIME_BONUS_PER_SECOND, TimerFeedback, WARNING_SECS,
    clock_seed, daily_seed, format_time,
};

// Crate-level exports - Sessions
pub use session::{GameSession, MISMATCH_DELAY, SessionMode, SessionStatus};

// Crate-level exports - Database layer
pub use db::{
    DailyChallengeDao, DailyChallengeEntity, Database, DbError, GameStats, LeaderboardDao,
    LeaderboardEntry, MIGRATIONS, NewLeaderboardEntry, NewSavedGame, NewSettings, SINGLETON_ID,
    SavedGameDao, SavedGameRow, Settings, SettingsDao, SettingsRow, StatsDao,
};

// Crate-level exports - Repositories
pub use repository::{
    DAILY_DIFFICULTY, DailyChallengeRepository, LEADERBOARD_SIZE, LeaderboardRepository,
    LeaderboardView, Repositories, SavedGame, SavedGameRepository, SettingsRepository,
    StatsRepository, daily_game,
};

// Crate-level exports - Service layer
pub use game_service::{GameReport, GameService};

// Crate-level exports - Terminal UI
pub use tui::{Screen, ScreenTransition, TuiController, run_tui};
