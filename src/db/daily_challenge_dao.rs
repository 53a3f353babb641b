//! Queries against `daily_challenge`.

use chrono::NaiveDate;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{DailyChallengeEntity, Database, DbError, schema};

/// Data access for daily challenge results.
#[derive(Debug, Clone)]
pub struct DailyChallengeDao {
    database: Database,
}

impl DailyChallengeDao {
    /// Creates a DAO over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Gets the result for a date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self, date: NaiveDate) -> Result<Option<DailyChallengeEntity>, DbError> {
        let mut conn = self.database.connection()?;
        let entity = schema::daily_challenge::table
            .find(date)
            .select(DailyChallengeEntity::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = entity.is_some(), "Daily challenge lookup");
        Ok(entity)
    }

    /// Whether the challenge for `date` was completed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn is_completed(&self, date: NaiveDate) -> Result<bool, DbError> {
        use schema::daily_challenge::dsl;

        let mut conn = self.database.connection()?;
        let completed = dsl::daily_challenge
            .find(date)
            .select(dsl::is_completed)
            .first::<bool>(&mut conn)
            .optional()?
            .unwrap_or(false);
        Ok(completed)
    }

    /// Stores a result, keeping whichever of the old and new is better.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, entity), fields(date = %entity.date(), score = entity.score()))]
    pub fn save(&self, entity: DailyChallengeEntity) -> Result<DailyChallengeEntity, DbError> {
        let mut conn = self.database.connection()?;
        let kept = conn.transaction::<_, DbError, _>(|conn| {
            let existing = schema::daily_challenge::table
                .find(*entity.date())
                .select(DailyChallengeEntity::as_select())
                .first(conn)
                .optional()?;

            let kept = match existing {
                Some(old) => old.better_of(entity),
                None => entity,
            };
            diesel::replace_into(schema::daily_challenge::table)
                .values(&kept)
                .execute(conn)?;
            Ok(kept)
        })?;
        info!(date = %kept.date(), completed = kept.is_completed(), "Daily challenge saved");
        Ok(kept)
    }

    /// Completed challenge dates on or before `until`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn completed_dates(&self, until: NaiveDate) -> Result<Vec<NaiveDate>, DbError> {
        use schema::daily_challenge::dsl;

        let mut conn = self.database.connection()?;
        let dates = dsl::daily_challenge
            .filter(dsl::is_completed.eq(true))
            .filter(dsl::date.le(until))
            .order(dsl::date.desc())
            .select(dsl::date)
            .load::<NaiveDate>(&mut conn)?;
        debug!(count = dates.len(), "Completed dates loaded");
        Ok(dates)
    }

    /// Most recent results, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent(&self, limit: i64) -> Result<Vec<DailyChallengeEntity>, DbError> {
        use schema::daily_challenge::dsl;

        let mut conn = self.database.connection()?;
        let entities = dsl::daily_challenge
            .order(dsl::date.desc())
            .limit(limit)
            .select(DailyChallengeEntity::as_select())
            .load(&mut conn)?;
        Ok(entities)
    }

    /// Number of completed challenges.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn completed_count(&self) -> Result<i64, DbError> {
        use schema::daily_challenge::dsl;

        let mut conn = self.database.connection()?;
        let count = dsl::daily_challenge
            .filter(dsl::is_completed.eq(true))
            .count()
            .get_result(&mut conn)?;
        Ok(count)
    }
}
