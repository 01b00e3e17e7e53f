//! Constraint-enforcing profile collection shared by the store backends.
//!
//! Both the in-memory and the TOML repositories hold their documents in a
//! `ProfileTable` and run each repository call as one method on it while
//! holding their own exclusive guard. Uniqueness of owners and handles is
//! checked here, so it holds no matter which backend is in use.

use devconnector_core::identity::UserId;
use devconnector_core::profile::{CreateOutcome, Education, Experience, Profile, ProfileUpdate};
use devconnector_core::{ProfileError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileTable {
    profiles: Vec<Profile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn find_by_owner(&self, owner: &UserId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.owner == owner)
    }

    pub fn find_by_handle(&self, handle: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.handle.as_deref() == Some(handle))
    }

    fn find_by_owner_mut(&mut self, owner: &UserId) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| &p.owner == owner)
    }

    /// Fails if `handle` is held by any profile other than `owner`'s.
    fn ensure_handle_free(&self, handle: Option<&str>, owner: &UserId) -> Result<()> {
        match handle.and_then(|h| self.find_by_handle(h)) {
            Some(holder) if &holder.owner != owner => {
                Err(ProfileError::handle_conflict(handle.unwrap_or_default()))
            }
            _ => Ok(()),
        }
    }

    pub fn insert(&mut self, profile: Profile) -> Result<CreateOutcome> {
        if self.find_by_owner(&profile.owner).is_some() {
            return Ok(CreateOutcome::OwnerExists);
        }
        self.ensure_handle_free(profile.handle.as_deref(), &profile.owner)?;

        self.profiles.push(profile.clone());
        Ok(CreateOutcome::Created(profile))
    }

    pub fn merge(&mut self, update: &ProfileUpdate) -> Result<Option<Profile>> {
        if self.find_by_owner(&update.owner).is_none() {
            return Ok(None);
        }
        self.ensure_handle_free(update.handle.as_deref(), &update.owner)?;

        Ok(self.find_by_owner_mut(&update.owner).map(|profile| {
            update.apply_to(profile);
            profile.clone()
        }))
    }

    pub fn prepend_experience(&mut self, owner: &UserId, entry: Experience) -> Option<Profile> {
        self.find_by_owner_mut(owner).map(|profile| {
            profile.prepend_experience(entry);
            profile.clone()
        })
    }

    pub fn prepend_education(&mut self, owner: &UserId, entry: Education) -> Option<Profile> {
        self.find_by_owner_mut(owner).map(|profile| {
            profile.prepend_education(entry);
            profile.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use devconnector_core::validation::ProfileFields;

    fn profile(owner: &str, handle: Option<&str>) -> Profile {
        let mut p = Profile::new(UserId::new(owner), Utc::now());
        p.handle = handle.map(str::to_string);
        p
    }

    fn handle_update(owner: &str, handle: &str) -> ProfileUpdate {
        ProfileUpdate::from_fields(
            UserId::new(owner),
            ProfileFields {
                handle: handle.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_insert_rejects_second_profile_for_owner() {
        let mut table = ProfileTable::new();
        assert!(matches!(
            table.insert(profile("a", None)).unwrap(),
            CreateOutcome::Created(_)
        ));
        assert_eq!(
            table.insert(profile("a", Some("other"))).unwrap(),
            CreateOutcome::OwnerExists
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_rejects_taken_handle() {
        let mut table = ProfileTable::new();
        table.insert(profile("a", Some("alice"))).unwrap();

        let err = table.insert(profile("b", Some("alice"))).unwrap_err();
        assert!(err.is_handle_conflict());
        assert!(table.find_by_owner(&UserId::new("b")).is_none());
    }

    #[test]
    fn test_merge_keeps_own_handle_but_rejects_foreign() {
        let mut table = ProfileTable::new();
        table.insert(profile("a", Some("alice"))).unwrap();
        table.insert(profile("b", Some("bob"))).unwrap();

        assert!(table.merge(&handle_update("a", "alice")).unwrap().is_some());

        let err = table.merge(&handle_update("b", "alice")).unwrap_err();
        assert!(err.is_handle_conflict());
        assert_eq!(
            table.find_by_owner(&UserId::new("b")).unwrap().handle.as_deref(),
            Some("bob")
        );
    }

    #[test]
    fn test_merge_missing_owner() {
        let mut table = ProfileTable::new();
        assert_eq!(table.merge(&handle_update("ghost", "ghost")).unwrap(), None);
    }
}
