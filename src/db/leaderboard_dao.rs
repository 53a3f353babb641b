//! Queries against `leaderboard`.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, LeaderboardEntry, NewLeaderboardEntry, schema};

/// Data access for leaderboard entries.
#[derive(Debug, Clone)]
pub struct LeaderboardDao {
    database: Database,
}

impl LeaderboardDao {
    /// Creates a DAO over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Inserts an entry and drops everything on its board size beyond the
    /// best `keep` entries, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, entry), fields(player = %entry.player_name(), score = entry.score()))]
    pub fn insert(
        &self,
        entry: NewLeaderboardEntry,
        keep: i64,
    ) -> Result<LeaderboardEntry, DbError> {
        use schema::leaderboard::dsl;

        let pair_count = *entry.pair_count();
        let mut conn = self.database.connection()?;
        let (inserted, pruned) = conn.transaction::<_, DbError, _>(|conn| {
            let inserted = diesel::insert_into(dsl::leaderboard)
                .values(&entry)
                .returning(LeaderboardEntry::as_returning())
                .get_result(conn)?;

            let kept_ids = dsl::leaderboard
                .filter(dsl::pair_count.eq(pair_count))
                .order((
                    dsl::score.desc(),
                    dsl::time_seconds.asc(),
                    dsl::played_at.asc(),
                    dsl::id.asc(),
                ))
                .limit(keep)
                .select(dsl::id)
                .load::<i32>(conn)?;
            let pruned = diesel::delete(
                dsl::leaderboard
                    .filter(dsl::pair_count.eq(pair_count))
                    .filter(dsl::id.ne_all(kept_ids)),
            )
            .execute(conn)?;
            Ok((inserted, pruned))
        })?;
        info!(entry_id = inserted.id(), pruned, "Leaderboard entry inserted");
        Ok(inserted)
    }

    /// Best entries for a board size: highest score, then fastest, then earliest.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn top(&self, pair_count: i32, limit: i64) -> Result<Vec<LeaderboardEntry>, DbError> {
        use schema::leaderboard::dsl;

        let mut conn = self.database.connection()?;
        let entries = dsl::leaderboard
            .filter(dsl::pair_count.eq(pair_count))
            .order((
                dsl::score.desc(),
                dsl::time_seconds.asc(),
                dsl::played_at.asc(),
                dsl::id.asc(),
            ))
            .limit(limit)
            .select(LeaderboardEntry::as_select())
            .load(&mut conn)?;
        debug!(count = entries.len(), "Leaderboard loaded");
        Ok(entries)
    }

    /// Number of entries for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count(&self, pair_count: i32) -> Result<i64, DbError> {
        use schema::leaderboard::dsl;

        let mut conn = self.database.connection()?;
        let count = dsl::leaderboard
            .filter(dsl::pair_count.eq(pair_count))
            .count()
            .get_result(&mut conn)?;
        Ok(count)
    }

    /// Deletes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<usize, DbError> {
        let mut conn = self.database.connection()?;
        let removed = diesel::delete(schema::leaderboard::table).execute(&mut conn)?;
        info!(removed, "Leaderboard cleared");
        Ok(removed)
    }
}
