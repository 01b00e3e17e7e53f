//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every key has a
//! default, so an empty or missing file yields a working configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter, overridden by `RUST_LOG`.
    pub log_level: String,
    pub store: StoreConfig,
    pub profile: ProfileSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            store: StoreConfig::default(),
            profile: ProfileSettings::default(),
        }
    }
}

impl AppConfig {
    /// Rejects configurations the lifecycle manager cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.profile.max_write_attempts == 0 {
            return Err(ProfileError::config(
                "profile.max_write_attempts must be at least 1",
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(ProfileError::config("log_level cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store; contents are lost on exit.
    #[default]
    Memory,
    /// Single TOML document on disk, guarded by an exclusive file lock.
    Toml,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Location of the TOML store. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileSettings {
    /// Keep the legacy create path that reports a handle conflict but still
    /// creates the profile (without the contested handle).
    pub legacy_nonfatal_handle_conflict: bool,
    /// Attempts for the create path when a concurrent request creates the
    /// same owner's profile first.
    pub max_write_attempts: u32,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            legacy_nonfatal_handle_conflict: false,
            max_write_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [store]
            backend = "toml"
            path = "/tmp/profiles.toml"

            [profile]
            legacy_nonfatal_handle_conflict = true
            max_write_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.store.backend, StoreBackend::Toml);
        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/profiles.toml")));
        assert!(config.profile.legacy_nonfatal_handle_conflict);
        assert_eq!(config.profile.max_write_attempts, 5);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = AppConfig::default();
        config.profile.max_write_attempts = 0;
        assert!(matches!(config.validate(), Err(ProfileError::Config(_))));
    }
}
