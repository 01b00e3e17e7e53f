//! Profile lifecycle use case.
//!
//! `ProfileLifecycleManager` is the only component that moves a profile
//! through its lifecycle: created lazily by the first successful
//! create-or-update call, then merged into and appended to. It validates
//! every input before touching the store and relies on the store's atomic
//! operations for consistency under concurrent requests.

use std::sync::Arc;

use chrono::Utc;
use devconnector_core::config::ProfileSettings;
use devconnector_core::identity::{CallerIdentity, UserDirectory, UserId};
use devconnector_core::profile::{
    CreateOutcome, Education, EducationInput, Experience, ExperienceInput, Profile, ProfileInput,
    ProfileRepository, ProfileUpdate, ProfileView,
};
use devconnector_core::validation::Validate;
use devconnector_core::{ProfileError, Result};

/// Response of the health check.
pub const PING_MESSAGE: &str = "Profile works";

/// Orchestrates find-or-create, sparse merge and history appends.
///
/// # Thread Safety
///
/// The manager holds no mutable state of its own; share it behind an `Arc`.
/// Atomicity of each operation is delegated to the injected
/// `ProfileRepository`.
pub struct ProfileLifecycleManager {
    /// Profile document store
    profiles: Arc<dyn ProfileRepository>,
    /// Public user fields joined into reads
    users: Arc<dyn UserDirectory>,
    settings: ProfileSettings,
}

/// What the create branch of `upsert_own` ended with.
enum CreateAttempt {
    Done(Profile),
    /// Legacy mode: the profile was created without the contested handle.
    CreatedWithoutHandle(String),
    /// Someone else created this owner's profile first.
    Raced,
}

impl ProfileLifecycleManager {
    /// Creates a new manager.
    ///
    /// # Arguments
    ///
    /// * `profiles` - The profile store
    /// * `users` - Directory used to join owner name/avatar into reads
    /// * `settings` - Create-path behaviour and retry bound
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        users: Arc<dyn UserDirectory>,
        settings: ProfileSettings,
    ) -> Self {
        Self {
            profiles,
            users,
            settings,
        }
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    /// Health check.
    pub fn ping(&self) -> &'static str {
        PING_MESSAGE
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// Returns the caller's own profile, joined with their public user fields.
    ///
    /// # Errors
    ///
    /// `NotFound` if the caller has no profile yet.
    pub async fn fetch_own(&self, caller: &CallerIdentity) -> Result<ProfileView> {
        self.fetch_by_owner(caller.user_id()).await
    }

    /// Returns every profile. An empty store yields an empty list.
    pub async fn fetch_all(&self) -> Result<Vec<ProfileView>> {
        let profiles = self.profiles.list_all().await?;
        let owners: Vec<UserId> = profiles.iter().map(|p| p.owner.clone()).collect();
        let mut summaries = self.users.find_summaries(&owners).await?;

        tracing::debug!("[Profile] Listing {} profiles", profiles.len());

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let user = summaries.remove(&profile.owner);
                ProfileView { profile, user }
            })
            .collect())
    }

    pub async fn fetch_by_handle(&self, handle: &str) -> Result<ProfileView> {
        match self.profiles.find_by_handle(handle).await? {
            Some(profile) => self.populate(profile).await,
            None => {
                tracing::debug!("[Profile] No profile with handle '{}'", handle);
                Err(ProfileError::not_found("profile", handle))
            }
        }
    }

    pub async fn fetch_by_owner(&self, owner: &UserId) -> Result<ProfileView> {
        match self.profiles.find_by_owner(owner).await? {
            Some(profile) => self.populate(profile).await,
            None => {
                tracing::debug!("[Profile] No profile for owner {}", owner);
                Err(ProfileError::not_found("profile", owner.as_str()))
            }
        }
    }

    async fn populate(&self, profile: Profile) -> Result<ProfileView> {
        let user = self.users.find_summary(&profile.owner).await?;
        Ok(ProfileView { profile, user })
    }

    // ============================================================================
    // Writes
    // ============================================================================

    /// Creates the caller's profile, or sparse-merges into the existing one.
    ///
    /// Fields absent from `input` are left untouched. Ownership is always
    /// the caller's identity.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed`: input rejected; the store was not accessed
    /// - `HandleConflict`: the handle belongs to another profile
    /// - `StoreFailure`: store fault, or the create path kept racing
    pub async fn upsert_own(&self, caller: &CallerIdentity, input: &ProfileInput) -> Result<Profile> {
        let owner = caller.user_id();
        let fields = input.validate().into_result().inspect_err(|e| {
            tracing::warn!("[Profile] Rejected profile fields from {}: {}", owner, e);
        })?;
        let update = ProfileUpdate::from_fields(owner.clone(), fields);

        let attempts = self.settings.max_write_attempts.max(1);
        for attempt in 1..=attempts {
            if let Some(profile) = self.profiles.merge(&update).await? {
                tracing::info!("[Profile] Updated profile for {}", owner);
                return Ok(profile);
            }

            match self.create_from(&update).await? {
                CreateAttempt::Done(profile) => {
                    tracing::info!("[Profile] Created profile for {}", owner);
                    return Ok(profile);
                }
                CreateAttempt::CreatedWithoutHandle(handle) => {
                    return Err(ProfileError::handle_conflict(handle));
                }
                CreateAttempt::Raced => {
                    tracing::warn!(
                        "[Profile] Profile for {} appeared during create (attempt {}/{})",
                        owner,
                        attempt,
                        attempts
                    );
                }
            }
        }

        Err(ProfileError::store(format!(
            "Gave up writing profile for {} after {} attempts",
            owner, attempts
        )))
    }

    async fn create_from(&self, update: &ProfileUpdate) -> Result<CreateAttempt> {
        // Fast path for a readable error; the store's constraint is authoritative.
        if let Some(handle) = &update.handle
            && let Some(holder) = self.profiles.find_by_handle(handle).await?
            && holder.owner != update.owner
        {
            return self.on_handle_conflict(update, handle).await;
        }

        match self
            .profiles
            .create(update.clone().into_profile(Utc::now()))
            .await
        {
            Ok(CreateOutcome::Created(profile)) => Ok(CreateAttempt::Done(profile)),
            Ok(CreateOutcome::OwnerExists) => Ok(CreateAttempt::Raced),
            Err(ProfileError::HandleConflict { handle }) => {
                self.on_handle_conflict(update, &handle).await
            }
            Err(e) => {
                tracing::error!("[Profile] Failed to create profile for {}: {}", update.owner, e);
                Err(e)
            }
        }
    }

    async fn on_handle_conflict(&self, update: &ProfileUpdate, handle: &str) -> Result<CreateAttempt> {
        if !self.settings.legacy_nonfatal_handle_conflict {
            tracing::warn!(
                "[Profile] Handle '{}' already taken; not creating profile for {}",
                handle,
                update.owner
            );
            return Err(ProfileError::handle_conflict(handle));
        }

        tracing::warn!(
            "[Profile] Handle '{}' already taken; creating profile for {} without it (legacy mode)",
            handle,
            update.owner
        );
        let without_handle = update.clone().without_handle().into_profile(Utc::now());
        match self.profiles.create(without_handle).await? {
            CreateOutcome::Created(_) => Ok(CreateAttempt::CreatedWithoutHandle(handle.to_string())),
            CreateOutcome::OwnerExists => Ok(CreateAttempt::Raced),
        }
    }

    /// Validates `input` and pushes it to the front of the caller's
    /// experience list.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed`: input rejected; the store was not accessed
    /// - `ProfileNotFound`: the caller has no profile yet
    pub async fn append_experience(
        &self,
        caller: &CallerIdentity,
        input: &ExperienceInput,
    ) -> Result<Profile> {
        let owner = caller.user_id();
        let fields = input.validate().into_result().inspect_err(|e| {
            tracing::warn!("[Profile] Rejected experience entry from {}: {}", owner, e);
        })?;
        let entry = Experience::from_fields(fields)?;
        let entry_id = entry.id;

        let profile = self
            .profiles
            .prepend_experience(owner, entry)
            .await?
            .ok_or_else(|| {
                tracing::warn!("[Profile] Experience append without a profile for {}", owner);
                ProfileError::profile_not_found(owner.as_str())
            })?;

        tracing::info!("[Profile] Added experience {} for {}", entry_id, owner);
        Ok(profile)
    }

    /// Validates `input` and pushes it to the front of the caller's
    /// education list.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed`: input rejected; the store was not accessed
    /// - `ProfileNotFound`: the caller has no profile yet
    pub async fn append_education(
        &self,
        caller: &CallerIdentity,
        input: &EducationInput,
    ) -> Result<Profile> {
        let owner = caller.user_id();
        let fields = input.validate().into_result().inspect_err(|e| {
            tracing::warn!("[Profile] Rejected education entry from {}: {}", owner, e);
        })?;
        let entry = Education::from_fields(fields)?;
        let entry_id = entry.id;

        let profile = self
            .profiles
            .prepend_education(owner, entry)
            .await?
            .ok_or_else(|| {
                tracing::warn!("[Profile] Education append without a profile for {}", owner);
                ProfileError::profile_not_found(owner.as_str())
            })?;

        tracing::info!("[Profile] Added education {} for {}", entry_id, owner);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devconnector_infrastructure::{InMemoryProfileRepository, InMemoryUserDirectory};

    fn manager(settings: ProfileSettings) -> ProfileLifecycleManager {
        ProfileLifecycleManager::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryUserDirectory::new()),
            settings,
        )
    }

    fn with_handle(handle: &str) -> ProfileInput {
        ProfileInput {
            handle: Some(handle.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ping() {
        assert_eq!(manager(ProfileSettings::default()).ping(), "Profile works");
    }

    #[tokio::test]
    async fn test_legacy_mode_creates_without_handle() {
        let manager = manager(ProfileSettings {
            legacy_nonfatal_handle_conflict: true,
            ..Default::default()
        });
        let alice = CallerIdentity::new("a");
        let bob = CallerIdentity::new("b");
        manager.upsert_own(&alice, &with_handle("alice")).await.unwrap();

        let err = manager
            .upsert_own(&bob, &with_handle("alice"))
            .await
            .unwrap_err();
        assert!(err.is_handle_conflict());

        // The legacy path still created bob's profile, minus the handle.
        let view = manager.fetch_own(&bob).await.unwrap();
        assert_eq!(view.profile.handle, None);
        let holder = manager.fetch_by_handle("alice").await.unwrap();
        assert_eq!(holder.profile.owner, UserId::new("a"));
    }

    #[tokio::test]
    async fn test_invalid_fields_reported() {
        let manager = manager(ProfileSettings::default());
        let err = manager
            .upsert_own(&CallerIdentity::new("a"), &with_handle("x"))
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().contains("handle"));
        assert!(manager.fetch_all().await.unwrap().is_empty());
    }
}
