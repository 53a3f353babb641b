//! Statistics repository.

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, GameStats, StatsDao};
use crate::repository::to_db_int;

/// Per-board-size statistics with a live view of every row.
#[derive(Debug)]
pub struct StatsRepository {
    dao: StatsDao,
    updates: watch::Sender<Vec<GameStats>>,
}

impl StatsRepository {
    /// Creates the repository and loads the initial view.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the initial load fails.
    #[instrument(skip(database))]
    pub fn new(database: Database) -> Result<Self, DbError> {
        let dao = StatsDao::new(database);
        let (updates, _) = watch::channel(dao.all()?);
        info!("Creating StatsRepository");
        Ok(Self { dao, updates })
    }

    /// Folds a finished game into the statistics for its board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_game(
        &self,
        pair_count: usize,
        score: u32,
        time_seconds: u64,
        moves: u32,
        completed: bool,
    ) -> Result<GameStats, DbError> {
        let stats = self.dao.record(
            to_db_int(pair_count as u64),
            to_db_int(u64::from(score)),
            to_db_int(time_seconds),
            to_db_int(u64::from(moves)),
            completed,
        )?;
        self.refresh()?;
        Ok(stats)
    }

    /// Statistics for a board size; all-zero when never played.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_stats(&self, pair_count: usize) -> Result<GameStats, DbError> {
        let pair_count = to_db_int(pair_count as u64);
        Ok(self
            .dao
            .find(pair_count)?
            .unwrap_or_else(|| GameStats::empty(pair_count)))
    }

    /// Every played board size, smallest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn all_stats(&self) -> Result<Vec<GameStats>, DbError> {
        self.dao.all()
    }

    /// Deletes all statistics.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), DbError> {
        self.dao.clear()?;
        self.refresh()
    }

    /// Receiver that sees the full statistics list after every write.
    pub fn subscribe(&self) -> watch::Receiver<Vec<GameStats>> {
        self.updates.subscribe()
    }

    fn refresh(&self) -> Result<(), DbError> {
        let all = self.dao.all()?;
        debug!(rows = all.len(), "Publishing stats");
        self.updates.send_replace(all);
        Ok(())
    }
}
