//! Settings repository.

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::db::{Database, DbError, Settings, SettingsDao};

/// User preferences, persisted in the settings table.
#[derive(Debug)]
pub struct SettingsRepository {
    dao: SettingsDao,
    updates: watch::Sender<Settings>,
}

impl SettingsRepository {
    /// Creates the repository and loads the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored row cannot be read or parsed.
    #[instrument(skip(database))]
    pub fn new(database: Database) -> Result<Self, DbError> {
        let dao = SettingsDao::new(database);
        let current = Self::read(&dao)?;
        let (updates, _) = watch::channel(current);
        info!("Creating SettingsRepository");
        Ok(Self { dao, updates })
    }

    /// Current settings; defaults when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored row cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Settings, DbError> {
        Self::read(&self.dao)
    }

    /// Persists `settings` and publishes them to subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn save(&self, settings: Settings) -> Result<(), DbError> {
        self.dao.upsert(settings.to_row())?;
        debug!(player = %settings.player_name(), "Publishing settings");
        self.updates.send_replace(settings);
        Ok(())
    }

    /// Receiver that sees every saved settings value.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.updates.subscribe()
    }

    fn read(dao: &SettingsDao) -> Result<Settings, DbError> {
        match dao.find()? {
            Some(row) => Settings::try_from(row),
            None => Ok(Settings::default()),
        }
    }
}
