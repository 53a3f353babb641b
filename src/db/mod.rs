//! Database persistence layer: SQLite through diesel, one DAO per table.

mod daily_challenge_dao;
mod database;
mod error;
mod leaderboard_dao;
mod models;
mod saved_game_dao;
mod schema; // Diesel generated schema - internal use only
mod settings_dao;
mod stats_dao;

pub use daily_challenge_dao::DailyChallengeDao;
pub use database::{Database, MIGRATIONS};
pub use error::DbError;
pub use leaderboard_dao::LeaderboardDao;
pub use models::{
    DailyChallengeEntity, GameStats, LeaderboardEntry, NewLeaderboardEntry, NewSavedGame,
    NewSettings, SINGLETON_ID, SavedGameRow, Settings, SettingsRow,
};
pub use saved_game_dao::SavedGameDao;
pub use settings_dao::SettingsDao;
pub use stats_dao::StatsDao;
