//! Command-line arguments.

use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// CLI options merged over the configuration file.
#[derive(Debug, Parser)]
#[command(
    name = "rosterdeck",
    version,
    about = "A lightweight terminal user-directory browser with chat",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the user-directory endpoint.
    #[arg(long, value_name = "URL", env = "ROSTERDECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Username attached to locally sent chat messages.
    #[arg(long)]
    pub username: Option<String>,

    /// Accent color (ratatui color name).
    #[arg(long)]
    pub accent_color: Option<String>,
}
