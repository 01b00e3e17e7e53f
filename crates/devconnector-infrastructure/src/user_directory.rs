//! In-memory UserDirectory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use devconnector_core::Result;
use devconnector_core::identity::{UserDirectory, UserId, UserSummary};
use tokio::sync::RwLock;

/// User summaries held in process memory.
///
/// Stands in for the user accounts collection, which is owned by the
/// authentication side of the system.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserSummary>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserSummary>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
        }
    }

    /// Adds or replaces a user summary.
    pub async fn upsert(&self, summary: UserSummary) {
        self.users.write().await.insert(summary.id.clone(), summary);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_summary(&self, id: &UserId) -> Result<Option<UserSummary>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_summaries(&self, ids: &[UserId]) -> Result<HashMap<UserId, UserSummary>> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|u| (id.clone(), u.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str) -> UserSummary {
        UserSummary {
            id: UserId::new(id),
            name: name.to_string(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_find_summaries_skips_unknown() {
        let directory = InMemoryUserDirectory::with_users([summary("a", "Alice")]);
        directory.upsert(summary("b", "Bob")).await;

        let found = directory
            .find_summaries(&[UserId::new("a"), UserId::new("b"), UserId::new("c")])
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[&UserId::new("b")].name, "Bob");
    }
}
