//! On-disk layout of the TOML profile store.

use serde::{Deserialize, Serialize};

use devconnector_core::profile::Profile;
use devconnector_core::{ProfileError, Result};

use super::profile::PROFILE_ENTITY;

/// The whole TOML profile store.
///
/// Each `[[profile]]` table carries its own `version` field and is kept as a
/// raw TOML value here, so version-migrate decides how to read it.
///
/// ```toml
/// [[profile]]
/// version = "1.0.0"
/// owner = "user-1"
/// handle = "alice"
/// created_at = "2024-01-01T00:00:00Z"
///
/// [[profile.experience]]
/// id = "..."
/// title = "Engineer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStoreDocument {
    #[serde(rename = "profile", default)]
    pub profiles: Vec<toml::Value>,
}

impl ProfileStoreDocument {
    /// Migrates every stored profile to the current domain model.
    pub fn load_profiles(&self, migrator: &version_migrate::Migrator) -> Result<Vec<Profile>> {
        self.profiles
            .iter()
            .map(|value| {
                migrator
                    .load_flat_from(PROFILE_ENTITY, value.clone())
                    .map_err(|e| ProfileError::store(format!("Failed to migrate profile: {}", e)))
            })
            .collect()
    }

    /// Builds a document holding `profiles` at the latest version.
    pub fn from_profiles(
        profiles: &[Profile],
        migrator: &version_migrate::Migrator,
    ) -> Result<Self> {
        let profiles = profiles
            .iter()
            .map(|profile| {
                let json_str = migrator
                    .save_domain_flat(PROFILE_ENTITY, profile)
                    .map_err(|e| {
                        ProfileError::store(format!("Failed to serialize profile: {}", e))
                    })?;
                serde_json::from_str::<toml::Value>(&json_str)
                    .map_err(|e| ProfileError::store(format!("Failed to convert profile: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { profiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::create_profile_migrator;
    use chrono::{TimeZone, Utc};
    use devconnector_core::identity::UserId;
    use devconnector_core::profile::{Experience, SocialLinks};
    use devconnector_core::validation::ExperienceFields;

    #[test]
    fn test_document_survives_toml() {
        let migrator = create_profile_migrator().unwrap();
        let mut profile = Profile::new(
            UserId::new("user-1"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        profile.handle = Some("alice".to_string());
        profile.skills = Some(vec!["go".to_string(), " rust ".to_string()]);
        profile.social = SocialLinks {
            twitter: Some("https://twitter.com/alice".to_string()),
            ..Default::default()
        };
        profile.prepend_experience(
            Experience::from_fields(ExperienceFields {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                from: "2020".to_string(),
                ..Default::default()
            })
            .unwrap(),
        );

        let doc = ProfileStoreDocument::from_profiles(&[profile.clone()], &migrator).unwrap();
        let text = toml::to_string_pretty(&doc).unwrap();
        assert!(text.contains("version = \"1.0.0\""));

        let back: ProfileStoreDocument = toml::from_str(&text).unwrap();
        assert_eq!(back.load_profiles(&migrator).unwrap(), vec![profile]);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let migrator = create_profile_migrator().unwrap();
        let doc: ProfileStoreDocument = toml::from_str(
            "[[profile]]\nversion = \"9.9.9\"\nowner = \"user-1\"\ncreated_at = \"2024-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        assert!(doc.load_profiles(&migrator).unwrap_err().is_store_failure());
    }
}
