//! Wiring of configuration, logging, stores and the lifecycle manager.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use devconnector_core::config::AppConfig;
use devconnector_core::identity::UserDirectory;
use devconnector_core::profile::ProfileRepository;
use devconnector_infrastructure::{ConfigService, open_profile_repository};

use crate::logging::init_tracing;
use crate::profile_usecase::ProfileLifecycleManager;

/// Everything a process entry point needs to serve profile requests.
///
/// The entry point owns this value for the life of the process and calls
/// [`AppBootstrap::shutdown`] when it stops serving.
pub struct AppBootstrap {
    pub config: AppConfig,
    pub profiles: Arc<dyn ProfileRepository>,
    pub manager: Arc<ProfileLifecycleManager>,
}

impl AppBootstrap {
    /// Loads configuration (from `config_path`, or the default location),
    /// installs logging and opens the configured store.
    pub fn load(config_path: Option<&Path>, users: Arc<dyn UserDirectory>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to resolve config location")?,
        };
        let config = config_service
            .get_config()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

        init_tracing(&config.log_level)?;
        tracing::info!(
            "[Bootstrap] Loaded config from {}",
            config_service.path().display()
        );

        Self::from_config(config, users)
    }

    /// Builds the application from an already loaded configuration.
    pub fn from_config(config: AppConfig, users: Arc<dyn UserDirectory>) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let profiles = open_profile_repository(&config.store)
            .context("Failed to open profile store")?;
        let manager = Arc::new(ProfileLifecycleManager::new(
            profiles.clone(),
            users,
            config.profile.clone(),
        ));

        tracing::info!(
            "[Bootstrap] Profile store ready ({:?} backend)",
            config.store.backend
        );

        Ok(Self {
            config,
            profiles,
            manager,
        })
    }

    /// Releases the store handle.
    pub fn shutdown(self) {
        tracing::info!("[Bootstrap] Shutting down profile service");
        drop(self.manager);
        drop(self.profiles);
    }
}
