//! Queries against `saved_game`.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, NewSavedGame, SINGLETON_ID, SavedGameRow, schema};

/// Data access for the single saved in-progress game.
#[derive(Debug, Clone)]
pub struct SavedGameDao {
    database: Database,
}

impl SavedGameDao {
    /// Creates a DAO over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Writes the saved game, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, row), fields(difficulty = %row.difficulty()))]
    pub fn upsert(&self, row: NewSavedGame) -> Result<(), DbError> {
        let mut conn = self.database.connection()?;
        diesel::replace_into(schema::saved_game::table)
            .values(&row)
            .execute(&mut conn)?;
        info!("Game saved");
        Ok(())
    }

    /// Reads the saved game, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self) -> Result<Option<SavedGameRow>, DbError> {
        let mut conn = self.database.connection()?;
        let row = schema::saved_game::table
            .find(SINGLETON_ID)
            .select(SavedGameRow::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = row.is_some(), "Saved game lookup");
        Ok(row)
    }

    /// Removes the saved game. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete(&self) -> Result<bool, DbError> {
        let mut conn = self.database.connection()?;
        let removed = diesel::delete(schema::saved_game::table.find(SINGLETON_ID))
            .execute(&mut conn)?;
        debug!(removed, "Saved game deleted");
        Ok(removed > 0)
    }
}
