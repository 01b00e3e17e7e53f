//! Construction of the configured profile store.

use std::sync::Arc;

use devconnector_core::Result;
use devconnector_core::config::{StoreBackend, StoreConfig};
use devconnector_core::profile::ProfileRepository;

use crate::{InMemoryProfileRepository, TomlProfileRepository};

/// Opens the profile store selected by `config`.
pub fn open_profile_repository(config: &StoreConfig) -> Result<Arc<dyn ProfileRepository>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory profile store");
            Ok(Arc::new(InMemoryProfileRepository::new()))
        }
        StoreBackend::Toml => {
            let repo = match &config.path {
                Some(path) => TomlProfileRepository::new(path.clone()),
                None => TomlProfileRepository::default_location()?,
            };
            tracing::info!("Using TOML profile store at {}", repo.path().display());
            Ok(Arc::new(repo))
        }
    }
}
