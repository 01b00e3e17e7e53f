//! Profile repository trait.
//!
//! Defines the interface for profile persistence operations.

use super::model::{Education, Experience, Profile};
use super::update::ProfileUpdate;
use crate::error::Result;
use crate::identity::UserId;

/// Outcome of inserting a new profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The profile was stored.
    Created(Profile),
    /// Another profile already exists for the same owner; nothing was written.
    OwnerExists,
}

/// An abstract store for profile documents, keyed by owner.
///
/// Each method is one logical operation and must be atomic with respect to
/// every other method on the same store: implementations may not expose a
/// window between reading a document and writing it back.
///
/// # Implementation Notes
///
/// Implementations must enforce, at the store level:
/// - At most one profile per owner
/// - Unique non-empty handles across all profiles
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile owned by `owner`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))`: Profile found
    /// - `Ok(None)`: No profile for this owner
    /// - `Err(ProfileError::StoreFailure)`: Store fault
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<Profile>>;

    /// Finds the profile holding `handle`.
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>>;

    /// Lists every stored profile, oldest first.
    async fn list_all(&self) -> Result<Vec<Profile>>;

    /// Inserts a new profile.
    ///
    /// # Returns
    ///
    /// - `Ok(CreateOutcome::Created(_))`: Stored
    /// - `Ok(CreateOutcome::OwnerExists)`: A profile for the owner already exists
    /// - `Err(ProfileError::HandleConflict)`: The handle is held by another owner
    async fn create(&self, profile: Profile) -> Result<CreateOutcome>;

    /// Atomically merges `update` into the profile owned by `update.owner`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))`: The merged document
    /// - `Ok(None)`: No profile for this owner
    /// - `Err(ProfileError::HandleConflict)`: The new handle is held by another owner
    async fn merge(&self, update: &ProfileUpdate) -> Result<Option<Profile>>;

    /// Atomically pushes `entry` to the front of the owner's experience list.
    ///
    /// Returns `Ok(None)` when the owner has no profile.
    async fn prepend_experience(&self, owner: &UserId, entry: Experience)
    -> Result<Option<Profile>>;

    /// Atomically pushes `entry` to the front of the owner's education list.
    ///
    /// Returns `Ok(None)` when the owner has no profile.
    async fn prepend_education(&self, owner: &UserId, entry: Education) -> Result<Option<Profile>>;
}
