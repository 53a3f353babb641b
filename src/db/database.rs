//! Connection factory and schema migrations.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::DbError;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Handle to the SQLite database file.
///
/// Every DAO call opens its own short-lived connection.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: String,
}

impl Database {
    /// Opens the database at `db_path`, creating it if needed, and applies
    /// pending migrations.
    ///
    /// `":memory:"` is rejected because every connection would see a
    /// different empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or a migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        if db_path == ":memory:" {
            return Err(DbError::new(
                "In-memory databases are not supported; use a file path",
            ));
        }
        info!(path = %db_path, "Opening database");
        let database = Self { db_path };
        database.migrate()?;
        Ok(database)
    }

    /// Path of the database file.
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection cannot be established.
    #[instrument(skip(self))]
    pub fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    #[instrument(skip(self))]
    fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(applied = applied.len(), "Migrations up to date");
        Ok(())
    }
}
