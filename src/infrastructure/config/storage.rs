//! Configuration file loading.

use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "rosterdeck";
const APP_NAME: &str = "rosterdeck";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "rosterdeck.log";

/// Configuration storage errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Resolves and loads configuration files under the platform config dir.
pub struct StorageManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StorageManager {
    /// Creates a manager rooted at the platform directories.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration directory cannot be
    /// determined.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a manager rooted at a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self {
            config_dir: path.clone(),
            data_dir: path,
        }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Default log file location.
    #[must_use]
    pub fn default_log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Loads the application configuration, writing a default file on the
    /// first run. A malformed file logs a warning and falls back to
    /// defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or created.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            info!(path = ?config_path, "Config file not found, creating default");
            let default_config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&config_path, toml::to_string_pretty(&default_config)?)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "Failed to parse config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}
