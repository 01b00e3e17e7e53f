//! AppConfig DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

use devconnector_core::Result;
use devconnector_core::config::{AppConfig, ProfileSettings, StoreConfig};

/// Application config V1.0.0 (initial version).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(default)]
pub struct AppConfigV1_0 {
    pub log_level: String,
    pub store: StoreConfig,
    pub profile: ProfileSettings,
}

impl Default for AppConfigV1_0 {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            log_level: config.log_level,
            store: config.store,
            profile: config.profile,
        }
    }
}

impl IntoDomain<AppConfig> for AppConfigV1_0 {
    fn into_domain(self) -> AppConfig {
        AppConfig {
            log_level: self.log_level,
            store: self.store,
            profile: self.profile,
        }
    }
}

/// Entity name the config file is registered under.
pub const APP_CONFIG_ENTITY: &str = "app_config";

/// Creates and configures a Migrator instance for the config file.
///
/// # Migration Path
///
/// - V1.0 → AppConfig: Converts DTO to domain model
pub fn create_app_config_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let config_path = version_migrate::Migrator::define(APP_CONFIG_ENTITY)
        .from::<AppConfigV1_0>()
        .into::<AppConfig>();

    migrator.register(config_path)?;

    Ok(migrator)
}
