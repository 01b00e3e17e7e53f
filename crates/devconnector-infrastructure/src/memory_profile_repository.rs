//! In-memory ProfileRepository implementation.

use async_trait::async_trait;
use devconnector_core::Result;
use devconnector_core::identity::UserId;
use devconnector_core::profile::{
    CreateOutcome, Education, Experience, Profile, ProfileRepository, ProfileUpdate,
};
use tokio::sync::RwLock;

use crate::profile_table::ProfileTable;

/// Process-local profile store.
///
/// Every mutating call takes the write lock for its whole duration, which
/// makes merge and prepend atomic with respect to each other.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    table: RwLock<ProfileTable>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `profiles`.
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            table: RwLock::new(ProfileTable::from_profiles(profiles)),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<Profile>> {
        Ok(self.table.read().await.find_by_owner(owner).cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>> {
        Ok(self.table.read().await.find_by_handle(handle).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        Ok(self.table.read().await.profiles().to_vec())
    }

    async fn create(&self, profile: Profile) -> Result<CreateOutcome> {
        self.table.write().await.insert(profile)
    }

    async fn merge(&self, update: &ProfileUpdate) -> Result<Option<Profile>> {
        self.table.write().await.merge(update)
    }

    async fn prepend_experience(
        &self,
        owner: &UserId,
        entry: Experience,
    ) -> Result<Option<Profile>> {
        Ok(self.table.write().await.prepend_experience(owner, entry))
    }

    async fn prepend_education(&self, owner: &UserId, entry: Education) -> Result<Option<Profile>> {
        Ok(self.table.write().await.prepend_education(owner, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use devconnector_core::validation::ExperienceFields;
    use std::sync::Arc;

    fn experience(title: &str) -> Experience {
        Experience::from_fields(ExperienceFields {
            title: title.to_string(),
            company: "Acme".to_string(),
            from: "2021".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryProfileRepository::new();
        let owner = UserId::new("user-1");
        let mut profile = Profile::new(owner.clone(), Utc::now());
        profile.handle = Some("alice".to_string());

        repo.create(profile.clone()).await.unwrap();

        assert_eq!(repo.find_by_owner(&owner).await.unwrap(), Some(profile.clone()));
        assert_eq!(repo.find_by_handle("alice").await.unwrap(), Some(profile));
        assert_eq!(repo.find_by_handle("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prepend_without_profile() {
        let repo = InMemoryProfileRepository::new();
        let result = repo
            .prepend_experience(&UserId::new("ghost"), experience("Engineer"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_prepends_are_not_lost() {
        let owner = UserId::new("user-1");
        let repo = Arc::new(InMemoryProfileRepository::with_profiles(vec![Profile::new(
            owner.clone(),
            Utc::now(),
        )]));

        let tasks = (0..32).map(|i| {
            let repo = repo.clone();
            let owner = owner.clone();
            tokio::spawn(async move {
                repo.prepend_experience(&owner, experience(&format!("Job {i}")))
                    .await
            })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let stored = repo.find_by_owner(&owner).await.unwrap().unwrap();
        assert_eq!(stored.experience.len(), 32);
    }
}
