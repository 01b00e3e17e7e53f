//! Infrastructure layer for the DevConnector profile backend.
//!
//! Concrete profile stores, identity collaborators, configuration loading and
//! path resolution.

pub mod config_service;
pub mod dto;
pub mod identity_provider;
pub mod memory_profile_repository;
pub mod paths;
pub mod profile_table;
pub mod storage;
pub mod store;
pub mod toml_profile_repository;
pub mod user_directory;

pub use crate::config_service::ConfigService;
pub use crate::identity_provider::StaticTokenIdentityProvider;
pub use crate::memory_profile_repository::InMemoryProfileRepository;
pub use crate::store::open_profile_repository;
pub use crate::toml_profile_repository::TomlProfileRepository;
pub use crate::user_directory::InMemoryUserDirectory;
