//! Profile domain model.
//!
//! A `Profile` is the single per-user document managed by the lifecycle
//! manager. Its `experience` and `education` sequences only ever grow, newest
//! entry first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ProfileError, Result};
use crate::identity::{UserId, UserSummary};
use crate::validation::{EducationFields, ExperienceFields, FieldErrors, parse_entry_date, supplied};

/// Links to a profile owner's social accounts.
///
/// Absent links are omitted on serialization rather than stored as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.youtube.is_none()
            && self.twitter.is_none()
            && self.instagram.is_none()
            && self.linkedin.is_none()
            && self.facebook.is_none()
    }

    /// Overwrites only the links present in `other`.
    pub fn merge(&mut self, other: &SocialLinks) {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }
        take(&mut self.youtube, &other.youtube);
        take(&mut self.twitter, &other.twitter);
        take(&mut self.instagram, &other.instagram);
        take(&mut self.linkedin, &other.linkedin);
        take(&mut self.facebook, &other.facebook);
    }
}

/// A work-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Experience {
    /// Builds an entry from validated fields, assigning a fresh id.
    pub fn from_fields(fields: ExperienceFields) -> Result<Self> {
        let (from, to) = parse_range(&fields.from, &fields.to)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: fields.title,
            company: fields.company,
            location: supplied(fields.location),
            from,
            to,
            current: fields.current,
            description: supplied(fields.description),
        })
    }
}

/// An education-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Education {
    /// Builds an entry from validated fields, assigning a fresh id.
    pub fn from_fields(fields: EducationFields) -> Result<Self> {
        let (from, to) = parse_range(&fields.from, &fields.to)?;
        Ok(Self {
            id: Uuid::new_v4(),
            school: fields.school,
            degree: fields.degree,
            fieldofstudy: fields.fieldofstudy,
            from,
            to,
            current: fields.current,
            description: supplied(fields.description),
        })
    }
}

fn parse_range(from: &str, to: &str) -> Result<(NaiveDate, Option<NaiveDate>)> {
    let from = parse_entry_date(from).ok_or_else(|| {
        ProfileError::ValidationFailed(FieldErrors::single(
            "from",
            "From date is not a valid date",
        ))
    })?;
    let to = match to {
        "" => None,
        value => Some(parse_entry_date(value).ok_or_else(|| {
            ProfileError::ValidationFailed(FieldErrors::single("to", "To date is not a valid date"))
        })?),
    };
    Ok((from, to))
}

/// The per-user profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user; unique across profiles and immutable after creation.
    pub owner: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default, skip_serializing_if = "SocialLinks::is_empty")]
    pub social: SocialLinks,
    /// Newest first.
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Newest first.
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates an empty profile for `owner`.
    pub fn new(owner: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            owner,
            handle: None,
            company: None,
            website: None,
            location: None,
            status: None,
            skills: None,
            bio: None,
            githubusername: None,
            social: SocialLinks::default(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at,
        }
    }

    pub fn prepend_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    pub fn prepend_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }
}

/// A profile with its owner joined against public user fields.
///
/// `user` is `None` when the directory has no record of the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience_fields(title: &str) -> ExperienceFields {
        ExperienceFields {
            title: title.to_string(),
            company: "Acme".to_string(),
            from: "2020-01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut profile = Profile::new(UserId::new("u1"), Utc::now());
        let first = Experience::from_fields(experience_fields("First")).unwrap();
        let second = Experience::from_fields(experience_fields("Second")).unwrap();

        profile.prepend_experience(first.clone());
        profile.prepend_experience(second.clone());

        assert_eq!(profile.experience, vec![second, first]);
    }

    #[test]
    fn test_entry_blank_optionals_become_none() {
        let entry = Experience::from_fields(experience_fields("Engineer")).unwrap();
        assert_eq!(entry.location, None);
        assert_eq!(entry.to, None);
        assert_eq!(entry.description, None);
        assert_eq!(entry.from, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_entry_rejects_unparseable_date() {
        let fields = ExperienceFields {
            to: "whenever".to_string(),
            ..experience_fields("Engineer")
        };
        let err = Experience::from_fields(fields).unwrap_err();
        assert!(err.field_errors().unwrap().contains("to"));
    }

    #[test]
    fn test_social_merge_is_sparse() {
        let mut links = SocialLinks {
            twitter: Some("https://twitter.com/a".to_string()),
            ..Default::default()
        };
        links.merge(&SocialLinks {
            youtube: Some("https://youtube.com/a".to_string()),
            ..Default::default()
        });

        assert_eq!(links.twitter.as_deref(), Some("https://twitter.com/a"));
        assert_eq!(links.youtube.as_deref(), Some("https://youtube.com/a"));
    }

    #[test]
    fn test_empty_social_is_omitted() {
        let profile = Profile::new(UserId::new("u1"), Utc::now());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("social").is_none());
        assert!(json.get("handle").is_none());
    }
}
