//! Profile DTOs and migrations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use devconnector_core::Result;
use devconnector_core::identity::UserId;
use devconnector_core::profile::{Education, Experience, Profile, SocialLinks};

/// Social links V1.0.0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinksV1_0 {
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

/// Experience entry V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ExperienceV1_0 {
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

/// Education entry V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct EducationV1_0 {
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

/// Profile document V1.0.0 (initial version).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ProfileV1_0 {
    pub owner: String,
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
    #[serde(default)]
    pub social: SocialLinksV1_0,
    /// Newest first.
    #[serde(default)]
    pub experience: Vec<ExperienceV1_0>,
    /// Newest first.
    #[serde(default)]
    pub education: Vec<EducationV1_0>,
    pub created_at: DateTime<Utc>,
}

/// Type alias for the latest Profile version.
pub type ProfileDTO = ProfileV1_0;

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<SocialLinksV1_0> for SocialLinks {
    fn from(dto: SocialLinksV1_0) -> Self {
        SocialLinks {
            youtube: dto.youtube,
            twitter: dto.twitter,
            instagram: dto.instagram,
            linkedin: dto.linkedin,
            facebook: dto.facebook,
        }
    }
}

impl From<&SocialLinks> for SocialLinksV1_0 {
    fn from(links: &SocialLinks) -> Self {
        SocialLinksV1_0 {
            youtube: links.youtube.clone(),
            twitter: links.twitter.clone(),
            instagram: links.instagram.clone(),
            linkedin: links.linkedin.clone(),
            facebook: links.facebook.clone(),
        }
    }
}

impl IntoDomain<Experience> for ExperienceV1_0 {
    fn into_domain(self) -> Experience {
        Experience {
            id: self.id,
            title: self.title,
            company: self.company,
            location: self.location,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

impl From<&Experience> for ExperienceV1_0 {
    fn from(entry: &Experience) -> Self {
        ExperienceV1_0 {
            id: entry.id,
            title: entry.title.clone(),
            company: entry.company.clone(),
            location: entry.location.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

impl IntoDomain<Education> for EducationV1_0 {
    fn into_domain(self) -> Education {
        Education {
            id: self.id,
            school: self.school,
            degree: self.degree,
            fieldofstudy: self.fieldofstudy,
            from: self.from,
            to: self.to,
            current: self.current,
            description: self.description,
        }
    }
}

impl From<&Education> for EducationV1_0 {
    fn from(entry: &Education) -> Self {
        EducationV1_0 {
            id: entry.id,
            school: entry.school.clone(),
            degree: entry.degree.clone(),
            fieldofstudy: entry.fieldofstudy.clone(),
            from: entry.from,
            to: entry.to,
            current: entry.current,
            description: entry.description.clone(),
        }
    }
}

/// Convert ProfileV1_0 DTO to domain model.
impl IntoDomain<Profile> for ProfileV1_0 {
    fn into_domain(self) -> Profile {
        Profile {
            owner: UserId::new(self.owner),
            handle: self.handle,
            company: self.company,
            website: self.website,
            location: self.location,
            status: self.status,
            skills: self.skills,
            bio: self.bio,
            githubusername: self.githubusername,
            social: self.social.into(),
            experience: self
                .experience
                .into_iter()
                .map(IntoDomain::into_domain)
                .collect(),
            education: self
                .education
                .into_iter()
                .map(IntoDomain::into_domain)
                .collect(),
            created_at: self.created_at,
        }
    }
}

/// Convert domain model to ProfileV1_0 DTO for persistence.
impl From<&Profile> for ProfileV1_0 {
    fn from(profile: &Profile) -> Self {
        ProfileV1_0 {
            owner: profile.owner.as_str().to_string(),
            handle: profile.handle.clone(),
            company: profile.company.clone(),
            website: profile.website.clone(),
            location: profile.location.clone(),
            status: profile.status.clone(),
            skills: profile.skills.clone(),
            bio: profile.bio.clone(),
            githubusername: profile.githubusername.clone(),
            social: SocialLinksV1_0::from(&profile.social),
            experience: profile.experience.iter().map(ExperienceV1_0::from).collect(),
            education: profile.education.iter().map(EducationV1_0::from).collect(),
            created_at: profile.created_at,
        }
    }
}

impl FromDomain<Profile> for ProfileV1_0 {
    fn from_domain(profile: Profile) -> Self {
        ProfileV1_0::from(&profile)
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Entity name profiles are registered under.
pub const PROFILE_ENTITY: &str = "profile";

/// Creates and configures a Migrator instance for Profile entities.
///
/// # Migration Path
///
/// - V1.0 → Profile: Converts DTO to domain model
pub fn create_profile_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let profile_path = version_migrate::Migrator::define(PROFILE_ENTITY)
        .from::<ProfileV1_0>()
        .into_with_save::<Profile>();

    migrator.register(profile_path)?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_migration_v1_0_to_domain() {
        let migrator = create_profile_migrator().unwrap();

        let toml_str = r#"
version = "1.0.0"
owner = "user-1"
handle = "alice"
skills = ["go", " rust "]
created_at = "2024-01-01T00:00:00Z"

[social]
twitter = "https://twitter.com/alice"

[[experience]]
id = "6f1c2a8e-1b4c-4c1e-9d3a-0b1e2f3a4b5c"
title = "Engineer"
company = "Acme"
from = "2020-01-01"
"#;
        let toml_value: toml::Value = toml::from_str(toml_str).unwrap();

        let result: std::result::Result<Profile, _> =
            migrator.load_flat_from(PROFILE_ENTITY, toml_value);

        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.owner, UserId::new("user-1"));
        assert_eq!(profile.handle.as_deref(), Some("alice"));
        assert_eq!(
            profile.skills,
            Some(vec!["go".to_string(), " rust ".to_string()])
        );
        assert_eq!(
            profile.social.twitter.as_deref(),
            Some("https://twitter.com/alice")
        );
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].to, None);
    }

    #[test]
    fn test_profile_save_carries_version() {
        let migrator = create_profile_migrator().unwrap();
        let mut profile = Profile::new(UserId::new("user-1"), Utc::now());
        profile.bio = Some("hello".to_string());

        let json_str = migrator.save_domain_flat(PROFILE_ENTITY, &profile).unwrap();

        assert!(json_str.contains("\"version\":\"1.0.0\""));
        assert!(json_str.contains("\"owner\":\"user-1\""));
        assert!(json_str.contains("\"bio\":\"hello\""));
    }
}
