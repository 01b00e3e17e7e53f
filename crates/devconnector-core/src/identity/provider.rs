//! Identity collaborator traits.

use std::collections::HashMap;

use super::model::{CallerIdentity, UserId, UserSummary};
use crate::error::Result;

/// Asserts who is making a call.
///
/// Token issuance and verification live outside the profile core; this trait
/// is the seam through which an authenticated identity enters it.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer credential to a caller identity.
    ///
    /// # Returns
    ///
    /// - `Ok(CallerIdentity)`: The credential is valid
    /// - `Err(ProfileError::Unauthorized)`: The credential was rejected
    async fn authenticate(&self, token: &str) -> Result<CallerIdentity>;
}

/// Read-only lookup of public user fields.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds the summary for a single user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserSummary))`: User found
    /// - `Ok(None)`: No such user
    /// - `Err(ProfileError)`: Lookup failed
    async fn find_summary(&self, id: &UserId) -> Result<Option<UserSummary>>;

    /// Finds summaries for many users at once. Unknown ids are skipped.
    async fn find_summaries(&self, ids: &[UserId]) -> Result<HashMap<UserId, UserSummary>> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(summary) = self.find_summary(id).await? {
                found.insert(id.clone(), summary);
            }
        }
        Ok(found)
    }
}
