//! Application configuration loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the database path.
pub const DB_PATH_ENV: &str = "MEMORY_MATCH_DB";

/// Settings that must be known before the database is opened.
///
/// Game preferences (player name, board size, timed mode) live in the
/// database instead, see [`crate::Settings`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// File that receives the tracing output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_db_path() -> String {
    "memory_match.db".to_string()
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("memory_match.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies overrides in precedence order: command line, then
    /// [`DB_PATH_ENV`], then the file value.
    #[instrument(skip(self))]
    pub fn with_db_path_override(mut self, cli_db_path: Option<String>) -> Self {
        if let Some(path) = cli_db_path.or_else(|| std::env::var(DB_PATH_ENV).ok()) {
            debug!(path = %path, "Overriding database path");
            self.db_path = path;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = \"custom.db\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.db_path(), "custom.db");
        assert_eq!(config.log_file(), &PathBuf::from("memory_match.log"));
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = AppConfig::load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = [").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn cli_override_wins() {
        let config = AppConfig::default().with_db_path_override(Some("cli.db".to_string()));
        assert_eq!(config.db_path(), "cli.db");
    }
}
