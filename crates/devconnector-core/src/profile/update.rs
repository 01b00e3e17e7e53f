//! Sparse profile update sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Profile, SocialLinks};
use crate::identity::UserId;
use crate::validation::{ProfileFields, supplied};

/// The fields a single create-or-update call will write.
///
/// `None` means "leave the stored value alone". `owner` is always the caller's
/// identity, never a caller-supplied value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub owner: UserId,
    pub handle: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: SocialLinks,
}

impl ProfileUpdate {
    /// Builds the update set from normalized fields.
    ///
    /// Empty scalars are dropped. A supplied `skills` string is split on
    /// commas with no trimming.
    pub fn from_fields(owner: UserId, fields: ProfileFields) -> Self {
        let social = SocialLinks {
            youtube: supplied(fields.social.youtube),
            twitter: supplied(fields.social.twitter),
            instagram: supplied(fields.social.instagram),
            linkedin: supplied(fields.social.linkedin),
            facebook: supplied(fields.social.facebook),
        };

        Self {
            owner,
            handle: supplied(fields.handle),
            company: supplied(fields.company),
            website: supplied(fields.website),
            location: supplied(fields.location),
            bio: supplied(fields.bio),
            status: supplied(fields.status),
            githubusername: supplied(fields.githubusername),
            skills: fields.skills.map(|s| split_skills(&s)),
            social,
        }
    }

    /// Merges the present fields into `profile`. `owner` and `created_at`
    /// are never touched.
    pub fn apply_to(&self, profile: &mut Profile) {
        fn set<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }
        set(&mut profile.handle, &self.handle);
        set(&mut profile.company, &self.company);
        set(&mut profile.website, &self.website);
        set(&mut profile.location, &self.location);
        set(&mut profile.bio, &self.bio);
        set(&mut profile.status, &self.status);
        set(&mut profile.githubusername, &self.githubusername);
        set(&mut profile.skills, &self.skills);
        profile.social.merge(&self.social);
    }

    /// Materializes a brand-new profile from the full update set.
    pub fn into_profile(self, created_at: DateTime<Utc>) -> Profile {
        let mut profile = Profile::new(self.owner.clone(), created_at);
        self.apply_to(&mut profile);
        profile
    }

    /// Same update without a handle.
    pub fn without_handle(mut self) -> Self {
        self.handle = None;
        self
    }
}

/// Splits a comma-delimited skills list verbatim.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
