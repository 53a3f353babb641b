//! Repository for the in-progress game that survives a restart.

use derive_getters::Getters;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::db::{Database, DbError, NewSavedGame, SavedGameDao};
use crate::game::{Difficulty, GameSnapshot, MatchGame};
use crate::repository::to_db_int;

/// A restored in-progress game.
#[derive(Debug, Clone, Getters)]
pub struct SavedGame {
    game: MatchGame,
    elapsed_secs: u64,
    is_daily: bool,
}

impl SavedGame {
    /// Splits into its parts.
    pub fn into_parts(self) -> (MatchGame, u64, bool) {
        (self.game, self.elapsed_secs, self.is_daily)
    }
}

/// Saves and restores the single in-progress game.
#[derive(Debug)]
pub struct SavedGameRepository {
    dao: SavedGameDao,
    present: watch::Sender<bool>,
}

impl SavedGameRepository {
    /// Creates the repository.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the initial lookup fails.
    #[instrument(skip(database))]
    pub fn new(database: Database) -> Result<Self, DbError> {
        let dao = SavedGameDao::new(database);
        let (present, _) = watch::channel(dao.find()?.is_some());
        info!("Creating SavedGameRepository");
        Ok(Self { dao, present })
    }

    /// Saves `game` so it can be resumed later.
    ///
    /// A finished game is not resumable, so saving one clears the slot instead.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if encoding or writing fails.
    #[instrument(skip(self, game), fields(difficulty = %game.difficulty(), moves = game.moves()))]
    pub fn save(&self, game: &MatchGame, elapsed_secs: u64, is_daily: bool) -> Result<(), DbError> {
        if game.is_completed() {
            return self.clear();
        }
        let snapshot = serde_json::to_string(&game.snapshot())?;
        self.dao.upsert(NewSavedGame::new(
            game.difficulty(),
            is_daily,
            to_db_int(elapsed_secs),
            snapshot,
        ))?;
        self.present.send_replace(true);
        Ok(())
    }

    /// Loads the saved game, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the row cannot be read or decoded.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<SavedGame>, DbError> {
        let Some(row) = self.dao.find()? else {
            return Ok(None);
        };

        let difficulty: Difficulty = row.difficulty().parse()?;
        let snapshot: GameSnapshot = serde_json::from_str(row.snapshot())?;
        let game = MatchGame::restore(snapshot);
        if game.difficulty() != difficulty {
            warn!(
                column = %difficulty,
                snapshot = %game.difficulty(),
                "Saved game difficulty disagrees with snapshot"
            );
            return Err(DbError::new("Saved game is inconsistent"));
        }

        info!(difficulty = %difficulty, moves = game.moves(), "Saved game loaded");
        Ok(Some(SavedGame {
            game,
            elapsed_secs: u64::try_from(*row.elapsed_seconds()).unwrap_or(0),
            is_daily: *row.is_daily(),
        }))
    }

    /// Discards the saved game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), DbError> {
        self.dao.delete()?;
        self.present.send_replace(false);
        Ok(())
    }

    /// Receiver that tracks whether a resumable game exists.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.present.subscribe()
    }
}
