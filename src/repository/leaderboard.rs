//! Leaderboard repository.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, LeaderboardDao, LeaderboardEntry, NewLeaderboardEntry};
use crate::game::Difficulty;
use crate::repository::to_db_int;

/// Entries kept per board size.
pub const LEADERBOARD_SIZE: i64 = 10;

/// Top entries per pair count.
pub type LeaderboardView = BTreeMap<i32, Vec<LeaderboardEntry>>;

/// Leaderboard with a live view of the top entries for every board size.
#[derive(Debug)]
pub struct LeaderboardRepository {
    dao: LeaderboardDao,
    updates: watch::Sender<LeaderboardView>,
}

impl LeaderboardRepository {
    /// Creates the repository and loads the initial view.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the initial load fails.
    #[instrument(skip(database))]
    pub fn new(database: Database) -> Result<Self, DbError> {
        let dao = LeaderboardDao::new(database);
        let (updates, _) = watch::channel(Self::load_view(&dao)?);
        info!("Creating LeaderboardRepository");
        Ok(Self { dao, updates })
    }

    /// Adds a finished game to the leaderboard.
    ///
    /// Only the best [`LEADERBOARD_SIZE`] entries per board size are kept, so
    /// an entry that does not make the list is dropped again right away.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn submit(
        &self,
        player_name: &str,
        pair_count: usize,
        score: u32,
        time_seconds: u64,
        moves: u32,
    ) -> Result<LeaderboardEntry, DbError> {
        let entry = NewLeaderboardEntry::new(
            player_name.to_string(),
            to_db_int(pair_count as u64),
            to_db_int(u64::from(score)),
            to_db_int(time_seconds),
            to_db_int(u64::from(moves)),
        );
        let inserted = self.dao.insert(entry, LEADERBOARD_SIZE)?;
        self.refresh()?;
        Ok(inserted)
    }

    /// Best `limit` entries for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn top(&self, pair_count: usize, limit: i64) -> Result<Vec<LeaderboardEntry>, DbError> {
        self.dao.top(to_db_int(pair_count as u64), limit)
    }

    /// Whether `score` would make the visible top list for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn qualifies(&self, pair_count: usize, score: u32) -> Result<bool, DbError> {
        let pair_count = to_db_int(pair_count as u64);
        if self.dao.count(pair_count)? < LEADERBOARD_SIZE {
            return Ok(true);
        }
        let lowest = self
            .dao
            .top(pair_count, LEADERBOARD_SIZE)?
            .last()
            .map(|e| *e.score())
            .unwrap_or(0);
        Ok(to_db_int(u64::from(score)) > lowest)
    }

    /// Deletes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), DbError> {
        self.dao.clear()?;
        self.refresh()
    }

    /// Receiver that sees the top entries of every board size after each write.
    pub fn subscribe(&self) -> watch::Receiver<LeaderboardView> {
        self.updates.subscribe()
    }

    fn load_view(dao: &LeaderboardDao) -> Result<LeaderboardView, DbError> {
        let mut view = LeaderboardView::new();
        for difficulty in Difficulty::iter() {
            let pair_count = to_db_int(difficulty.pair_count() as u64);
            view.insert(pair_count, dao.top(pair_count, LEADERBOARD_SIZE)?);
        }
        Ok(view)
    }

    fn refresh(&self) -> Result<(), DbError> {
        let view = Self::load_view(&self.dao)?;
        debug!(boards = view.len(), "Publishing leaderboard");
        self.updates.send_replace(view);
        Ok(())
    }
}
