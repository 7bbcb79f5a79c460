pub mod app;
pub mod config;
pub mod error;
pub mod storage;

pub use app::App;
pub use config::{Config, LoggingConfig, UiConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, StorageError, WeatherError};
pub use storage::{LocalStorage, LOCATION_KEY};

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize diagnostic logging.
///
/// The terminal belongs to the UI while it runs, so events are appended to
/// the log file named by [`Config::log_path`]. `RUST_LOG` overrides the
/// configured level.
pub fn init(config: &Config) -> Result<()> {
    log_subscriber(config)?
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Classy core initialized");
    Ok(())
}

fn log_subscriber(config: &Config) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    std::fs::create_dir_all(&config.config_dir).context("Failed to create config directory")?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .context("Failed to open log file")?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .finish())
}
