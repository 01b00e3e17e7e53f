//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` (by default
//! `~/.config/devconnector/config.toml`). A missing file yields defaults; a
//! malformed or invalid one is an error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use devconnector_core::config::AppConfig;
use devconnector_core::{ProfileError, Result};

use crate::dto::{APP_CONFIG_ENTITY, create_app_config_migrator};
use crate::paths::DevConnectorPaths;

/// Version assumed for config files that carry no `version` key.
const UNVERSIONED_CONFIG: &str = "1.0.0";

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration; `None` until first load.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the default config location.
    pub fn new() -> Result<Self> {
        let path =
            DevConnectorPaths::config_file().map_err(|e| ProfileError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading from `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, loading it from disk on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|e| ProfileError::internal(format!("Config cache poisoned: {}", e)))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::load_from(&self.path)?;

        let mut cached = self
            .config
            .write()
            .map_err(|e| ProfileError::internal(format!("Config cache poisoned: {}", e)))?;
        *cached = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut value: toml::Value = toml::from_str(&content)?;
        if let toml::Value::Table(table) = &mut value
            && !table.contains_key("version")
        {
            table.insert(
                "version".to_string(),
                toml::Value::String(UNVERSIONED_CONFIG.to_string()),
            );
        }

        let config: AppConfig =
            create_app_config_migrator()?.load_flat_from(APP_CONFIG_ENTITY, value)?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
