use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rosterdeck::infrastructure::{AppConfig, CliArgs, HttpUserDirectory, StorageManager};
use rosterdeck::presentation::App;

fn init_logging(config: &AppConfig, storage: &StorageManager) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let log_path = config
        .log_path
        .clone()
        .unwrap_or_else(|| storage.default_log_path());

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!(path = %log_path.display(), "Logging initialized");

    Ok(())
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config, &storage)?;

    info!(version = rosterdeck::VERSION, "Starting rosterdeck");

    let directory = Arc::new(HttpUserDirectory::with_base_url(&config.base_url)?);

    Ok(App::new(directory, &config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
