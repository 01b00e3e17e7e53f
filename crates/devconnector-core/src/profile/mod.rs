//! Profile domain module.
//!
//! This module contains the profile document model, the typed input records
//! accepted by profile operations, sparse update sets and the repository
//! interface.
//!
//! # Module Structure
//!
//! - `model`: `Profile`, `Experience`, `Education`, `SocialLinks`, `ProfileView`
//! - `request`: caller input records (`ProfileInput`, `ExperienceInput`, ...)
//! - `update`: `ProfileUpdate`, the sparse field-update set
//! - `repository`: `ProfileRepository` trait for persistence
//!
//! # Usage
//!
//! ```ignore
//! use devconnector_core::profile::{Profile, ProfileInput, ProfileRepository};
//! ```

mod model;
pub mod repository;
pub mod request;
mod update;

// Re-export public API
pub use model::{Education, Experience, Profile, ProfileView, SocialLinks};
pub use repository::{CreateOutcome, ProfileRepository};
pub use request::{EducationInput, ExperienceInput, ProfileInput, SocialInput};
pub use update::{ProfileUpdate, split_skills};
