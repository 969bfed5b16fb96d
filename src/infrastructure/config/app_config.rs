//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::http::DEFAULT_BASE_URL;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent color (ratatui color name).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Timestamp format for the created-at column (chrono format).
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            date_format: default_date_format(),
        }
    }
}

/// Application configuration from file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the user-directory endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username attached to locally sent chat messages.
    #[serde(default = "default_username")]
    pub username: String,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_username() -> String {
    "vanshika".to_string()
}

fn default_accent_color() -> String {
    "Magenta".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = args.base_url {
            self.base_url = base_url;
        }
        if let Some(username) = args.username {
            self.username = username;
        }
        if let Some(accent_color) = args.accent_color {
            self.ui.accent_color = accent_color;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            base_url: default_base_url(),
            username: default_username(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            base_url = "http://localhost:4010"
            username = "tester"

            [ui]
            accent_color = "Cyan"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.base_url, "http://localhost:4010");
        assert_eq!(config.username, "tester");
        assert_eq!(config.ui.accent_color, "Cyan");
        assert_eq!(config.ui.date_format, default_date_format());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config = AppConfig::default();
        config.merge_with_args(CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Debug),
            base_url: Some("http://localhost:9000".into()),
            username: None,
            accent_color: None,
        });

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.username, default_username());
    }
}
