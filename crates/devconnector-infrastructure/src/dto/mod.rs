//! Versioned DTOs for persisted documents.

mod app_config;
mod profile;
mod profile_store;

pub use app_config::{APP_CONFIG_ENTITY, AppConfigV1_0, create_app_config_migrator};
pub use profile::{
    EducationV1_0, ExperienceV1_0, PROFILE_ENTITY, ProfileDTO, ProfileV1_0, SocialLinksV1_0,
    create_profile_migrator,
};
pub use profile_store::ProfileStoreDocument;
