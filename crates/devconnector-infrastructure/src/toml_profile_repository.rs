//! TOML file-based ProfileRepository implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use devconnector_core::identity::UserId;
use devconnector_core::profile::{
    CreateOutcome, Education, Experience, Profile, ProfileRepository, ProfileUpdate,
};
use devconnector_core::{ProfileError, Result};
use tokio::sync::Mutex;

use crate::dto::{ProfileStoreDocument, create_profile_migrator};
use crate::paths::DevConnectorPaths;
use crate::profile_table::ProfileTable;
use crate::storage::{AtomicTomlFile, Mutation};

/// Profile store persisted as a single TOML document.
///
/// Each repository call is one locked read-modify-write of the file
/// (see [`AtomicTomlFile::update`]), so concurrent calls from this process
/// or another process sharing the file never lose each other's writes.
/// Blocking file I/O runs on tokio's blocking pool. Records are read and
/// written through the profile migrator, so each `[[profile]]` table carries
/// its schema version. A call that changes nothing leaves the file as it is.
///
/// File layout:
/// ```text
/// data_dir/devconnector/
/// ├── profiles.toml
/// └── profiles.lock
/// ```
pub struct TomlProfileRepository {
    file: Arc<AtomicTomlFile<ProfileStoreDocument>>,
    /// Serializes writers from this process so they queue on the runtime
    /// instead of parking blocking-pool threads on the file lock.
    writer: Mutex<()>,
}

impl TomlProfileRepository {
    /// Opens the store at the default data location.
    pub fn default_location() -> Result<Self> {
        let path = DevConnectorPaths::profile_store_file()
            .map_err(|e| ProfileError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    /// Opens (without creating) the store at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn read<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&ProfileTable) -> R + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || {
            let migrator = create_profile_migrator()?;
            let doc = file.load_locked()?.unwrap_or_default();
            let table = ProfileTable::from_profiles(doc.load_profiles(&migrator)?);
            Ok(f(&table))
        })
        .await
        .map_err(|e| ProfileError::store(format!("Profile store task failed: {}", e)))?
    }

    /// Runs `f` under the file lock. The file is rewritten only when
    /// `changed` says the result reflects a mutation.
    async fn write<R, F, C>(&self, f: F, changed: C) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut ProfileTable) -> Result<R> + Send + 'static,
        C: FnOnce(&R) -> bool + Send + 'static,
    {
        let _writer = self.writer.lock().await;
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || {
            file.update(ProfileStoreDocument::default(), |doc| -> Result<Mutation<R>> {
                let migrator = create_profile_migrator()?;
                let mut table = ProfileTable::from_profiles(doc.load_profiles(&migrator)?);
                let result = f(&mut table)?;
                if !changed(&result) {
                    return Ok(Mutation::Unchanged(result));
                }
                *doc = ProfileStoreDocument::from_profiles(table.profiles(), &migrator)?;
                Ok(Mutation::Changed(result))
            })
        })
        .await
        .map_err(|e| ProfileError::store(format!("Profile store task failed: {}", e)))?
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<Profile>> {
        let owner = owner.clone();
        self.read(move |table| table.find_by_owner(&owner).cloned())
            .await
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>> {
        let handle = handle.to_string();
        self.read(move |table| table.find_by_handle(&handle).cloned())
            .await
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        self.read(|table| table.profiles().to_vec()).await
    }

    async fn create(&self, profile: Profile) -> Result<CreateOutcome> {
        self.write(
            move |table| table.insert(profile),
            |outcome| matches!(outcome, CreateOutcome::Created(_)),
        )
        .await
    }

    async fn merge(&self, update: &ProfileUpdate) -> Result<Option<Profile>> {
        let update = update.clone();
        self.write(move |table| table.merge(&update), Option::is_some)
            .await
    }

    async fn prepend_experience(
        &self,
        owner: &UserId,
        entry: Experience,
    ) -> Result<Option<Profile>> {
        let owner = owner.clone();
        self.write(
            move |table| Ok(table.prepend_experience(&owner, entry)),
            Option::is_some,
        )
        .await
    }

    async fn prepend_education(&self, owner: &UserId, entry: Education) -> Result<Option<Profile>> {
        let owner = owner.clone();
        self.write(
            move |table| Ok(table.prepend_education(&owner, entry)),
            Option::is_some,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use devconnector_core::validation::{EducationFields, ProfileFields};
    use tempfile::TempDir;

    fn create_test_repository() -> (TomlProfileRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlProfileRepository::new(temp_dir.path().join("profiles.toml"));
        (repo, temp_dir)
    }

    fn education(school: &str) -> Education {
        Education::from_fields(EducationFields {
            school: school.to_string(),
            degree: "BSc".to_string(),
            fieldofstudy: "CS".to_string(),
            from: "2010-09".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_reads() {
        let (repo, _temp_dir) = create_test_repository();

        assert!(repo.list_all().await.unwrap().is_empty());
        assert!(repo
            .find_by_owner(&UserId::new("nobody"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_merge_prepend_persist() {
        let (repo, temp_dir) = create_test_repository();
        let owner = UserId::new("user-1");

        let created = repo
            .create(Profile::new(owner.clone(), Utc::now()))
            .await
            .unwrap();
        assert!(matches!(created, CreateOutcome::Created(_)));

        let update = ProfileUpdate::from_fields(
            owner.clone(),
            ProfileFields {
                handle: "alice".to_string(),
                bio: "hello".to_string(),
                ..Default::default()
            },
        );
        repo.merge(&update).await.unwrap().unwrap();
        repo.prepend_education(&owner, education("First"))
            .await
            .unwrap()
            .unwrap();
        repo.prepend_education(&owner, education("Second"))
            .await
            .unwrap()
            .unwrap();

        // A fresh handle on the same file sees everything.
        let reopened = TomlProfileRepository::new(temp_dir.path().join("profiles.toml"));
        let stored = reopened.find_by_handle("alice").await.unwrap().unwrap();
        assert_eq!(stored.bio.as_deref(), Some("hello"));
        let schools: Vec<_> = stored.education.iter().map(|e| e.school.as_str()).collect();
        assert_eq!(schools, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_handle_conflict_leaves_file_untouched() {
        let (repo, _temp_dir) = create_test_repository();

        let mut alice = Profile::new(UserId::new("a"), Utc::now());
        alice.handle = Some("alice".to_string());
        repo.create(alice).await.unwrap();

        let mut copycat = Profile::new(UserId::new("b"), Utc::now());
        copycat.handle = Some("alice".to_string());
        let err = repo.create(copycat).await.unwrap_err();

        assert!(err.is_handle_conflict());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_absent_owner_writes_nothing() {
        let (repo, temp_dir) = create_test_repository();
        let path = temp_dir.path().join("profiles.toml");
        let ghost = UserId::new("ghost");

        let merged = repo
            .merge(&ProfileUpdate::from_fields(
                ghost.clone(),
                ProfileFields {
                    bio: "boo".to_string(),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();
        assert!(merged.is_none());
        assert!(repo
            .prepend_education(&ghost, education("Nowhere"))
            .await
            .unwrap()
            .is_none());
        assert!(!path.exists());

        repo.create(Profile::new(UserId::new("user-1"), Utc::now()))
            .await
            .unwrap();
        let mut text = std::fs::read_to_string(&path).unwrap();
        text.insert_str(0, "# kept\n");
        std::fs::write(&path, &text).unwrap();

        assert!(repo
            .prepend_education(&ghost, education("Nowhere"))
            .await
            .unwrap()
            .is_none());
        let second = repo
            .create(Profile::new(UserId::new("user-1"), Utc::now()))
            .await
            .unwrap();
        assert!(matches!(second, CreateOutcome::OwnerExists));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_repositories_share_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.toml");
        let owner = UserId::new("user-1");

        TomlProfileRepository::new(path.clone())
            .create(Profile::new(owner.clone(), Utc::now()))
            .await
            .unwrap();

        // Separate repository instances only share the file lock.
        let tasks = (0..8).map(|i| {
            let repo = TomlProfileRepository::new(path.clone());
            let owner = owner.clone();
            tokio::spawn(async move {
                repo.prepend_education(&owner, education(&format!("School {i}")))
                    .await
            })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let stored = TomlProfileRepository::new(path)
            .find_by_owner(&owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.education.len(), 8);
    }
}
