//! Queries against `settings`.

use diesel::prelude::*;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, NewSettings, SINGLETON_ID, SettingsRow, schema};

/// Data access for the settings row.
#[derive(Debug, Clone)]
pub struct SettingsDao {
    database: Database,
}

impl SettingsDao {
    /// Creates a DAO over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Reads the settings row, if it was ever written.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find(&self) -> Result<Option<SettingsRow>, DbError> {
        let mut conn = self.database.connection()?;
        let row = schema::settings::table
            .find(SINGLETON_ID)
            .select(SettingsRow::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = row.is_some(), "Settings lookup");
        Ok(row)
    }

    /// Writes the settings row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, row))]
    pub fn upsert(&self, row: NewSettings) -> Result<(), DbError> {
        let mut conn = self.database.connection()?;
        diesel::replace_into(schema::settings::table)
            .values(&row)
            .execute(&mut conn)?;
        info!("Settings written");
        Ok(())
    }
}
