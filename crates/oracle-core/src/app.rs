use anyhow::Result;
use std::sync::Arc;

use crate::{Config, ValidationResult};

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the on-disk config plus environment overrides
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    /// Create an application instance from an already-built config
    pub fn with_config(config: Config) -> Result<Self> {
        let validation = config.validate();
        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }
        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the config for background tasks
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Warnings collected while validating the config (missing keys etc.)
    pub fn warnings(&self) -> &[crate::config::ConfigValidationError] {
        &self.validation.warnings
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down Outbreak Oracle");
        Ok(())
    }
}
