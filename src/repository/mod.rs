//! Repositories: thin layers over the DAOs that also publish their read
//! models on watch channels.

mod daily_challenge;
mod leaderboard;
mod saved_game;
mod settings;
mod stats;

pub use daily_challenge::{DAILY_DIFFICULTY, DailyChallengeRepository, daily_game};
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardRepository, LeaderboardView};
pub use saved_game::{SavedGame, SavedGameRepository};
pub use settings::SettingsRepository;
pub use stats::StatsRepository;

use tracing::instrument;

use crate::db::{Database, DbError};

/// SQLite integers are stored as `i32`; larger values saturate.
pub(crate) fn to_db_int(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Every repository, opened over one database.
#[derive(Debug)]
pub struct Repositories {
    /// Per-board-size statistics.
    pub stats: StatsRepository,
    /// Top scores.
    pub leaderboard: LeaderboardRepository,
    /// Resumable game.
    pub saved_game: SavedGameRepository,
    /// User preferences.
    pub settings: SettingsRepository,
    /// Daily challenge results.
    pub daily: DailyChallengeRepository,
}

impl Repositories {
    /// Opens every repository over `database`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any initial load fails.
    #[instrument(skip(database), fields(path = %database.path()))]
    pub fn open(database: Database) -> Result<Self, DbError> {
        Ok(Self {
            stats: StatsRepository::new(database.clone())?,
            leaderboard: LeaderboardRepository::new(database.clone())?,
            saved_game: SavedGameRepository::new(database.clone())?,
            settings: SettingsRepository::new(database.clone())?,
            daily: DailyChallengeRepository::new(database)?,
        })
    }
}
