//! Queries against `game_stats`.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, GameStats, schema};

/// Data access for per-board-size statistics.
#[derive(Debug, Clone)]
pub struct StatsDao {
    database: Database,
}

impl StatsDao {
    /// Creates a DAO over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Gets statistics for a pair count. Returns `None` if never played.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self, pair_count: i32) -> Result<Option<GameStats>, DbError> {
        let mut conn = self.database.connection()?;
        let stats = schema::game_stats::table
            .find(pair_count)
            .select(GameStats::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = stats.is_some(), "Stats lookup");
        Ok(stats)
    }

    /// Lists statistics for every played size, smallest board first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn all(&self) -> Result<Vec<GameStats>, DbError> {
        let mut conn = self.database.connection()?;
        let stats = schema::game_stats::table
            .order(schema::game_stats::pair_count.asc())
            .select(GameStats::as_select())
            .load(&mut conn)?;
        debug!(count = stats.len(), "Stats loaded");
        Ok(stats)
    }

    /// Reads, merges and writes one game result in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record(
        &self,
        pair_count: i32,
        score: i32,
        time_seconds: i32,
        moves: i32,
        completed: bool,
    ) -> Result<GameStats, DbError> {
        let mut conn = self.database.connection()?;
        let updated = conn.transaction::<_, DbError, _>(|conn| {
            let current = schema::game_stats::table
                .find(pair_count)
                .select(GameStats::as_select())
                .first(conn)
                .optional()?
                .unwrap_or_else(|| GameStats::empty(pair_count));

            let next = current.merged(score, time_seconds, moves, completed);
            diesel::replace_into(schema::game_stats::table)
                .values(&next)
                .execute(conn)?;
            Ok(next)
        })?;
        info!(
            pair_count,
            games_played = updated.games_played(),
            best_score = updated.best_score(),
            "Stats recorded"
        );
        Ok(updated)
    }

    /// Deletes every statistics row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<usize, DbError> {
        let mut conn = self.database.connection()?;
        let removed = diesel::delete(schema::game_stats::table).execute(&mut conn)?;
        info!(removed, "Stats cleared");
        Ok(removed)
    }
}
