use anyhow::Result;
use std::sync::Arc;

use crate::{Config, LocalStorage, ValidationResult};

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    storage: LocalStorage,
    validation: ValidationResult,
}

impl App {
    /// Load and validate configuration, then open local storage next to it
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self::from_parts(config, validation))
    }

    pub fn with_config(config: Config) -> Self {
        let validation = config.validate();
        Self::from_parts(config, validation)
    }

    fn from_parts(config: Config, validation: ValidationResult) -> Self {
        let storage = LocalStorage::open(&config.config_dir);
        Self {
            config: Arc::new(config),
            storage,
            validation,
        }
    }

    /// Install logging, then report config warnings found while loading.
    /// Call once, before the UI takes over the terminal.
    pub fn initialize(&mut self) -> Result<()> {
        crate::init(&self.config)?;
        tracing::info!(
            "Application initialized (config dir {:?})",
            self.config.config_dir
        );
        self.log_config_warnings();
        Ok(())
    }

    fn log_config_warnings(&self) {
        for warning in &self.validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
    }

    /// Hand config and storage over to the UI, which owns them for the rest of the session
    pub fn into_parts(self) -> (Arc<Config>, LocalStorage) {
        (self.config, self.storage)
    }
}
