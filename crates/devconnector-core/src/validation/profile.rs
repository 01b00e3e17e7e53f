//! Profile-level validation gate.

use super::{FieldErrors, Validate, Validation, check_url, normalize};
use crate::profile::{ProfileInput, SocialInput};

const HANDLE_MIN_CHARS: usize = 2;
const HANDLE_MAX_CHARS: usize = 40;

/// Normalized profile fields.
///
/// Scalars carry the empty sentinel when absent. `skills` keeps its presence
/// information because a supplied value is split even when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub handle: String,
    pub company: String,
    pub website: String,
    pub location: String,
    pub bio: String,
    pub status: String,
    pub githubusername: String,
    pub skills: Option<String>,
    pub social: SocialFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialFields {
    pub youtube: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
    pub facebook: String,
}

impl SocialFields {
    fn from_input(input: &SocialInput) -> Self {
        Self {
            youtube: normalize(&input.youtube),
            twitter: normalize(&input.twitter),
            instagram: normalize(&input.instagram),
            linkedin: normalize(&input.linkedin),
            facebook: normalize(&input.facebook),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("youtube", self.youtube.as_str()),
            ("twitter", self.twitter.as_str()),
            ("instagram", self.instagram.as_str()),
            ("linkedin", self.linkedin.as_str()),
            ("facebook", self.facebook.as_str()),
        ]
    }
}

impl Validate for ProfileInput {
    type Normalized = ProfileFields;

    fn validate(&self) -> Validation<ProfileFields> {
        let normalized = ProfileFields {
            handle: normalize(&self.handle),
            company: normalize(&self.company),
            website: normalize(&self.website),
            location: normalize(&self.location),
            bio: normalize(&self.bio),
            status: normalize(&self.status),
            githubusername: normalize(&self.githubusername),
            skills: self.skills.clone(),
            social: SocialFields::from_input(&self.social),
        };

        let mut errors = FieldErrors::new();

        let handle_len = normalized.handle.chars().count();
        if !normalized.handle.is_empty()
            && !(HANDLE_MIN_CHARS..=HANDLE_MAX_CHARS).contains(&handle_len)
        {
            errors.insert(
                "handle",
                format!(
                    "Handle needs to be between {HANDLE_MIN_CHARS} and {HANDLE_MAX_CHARS} characters"
                ),
            );
        }

        check_url(&mut errors, "website", &normalized.website);
        for (field, value) in normalized.social.entries() {
            check_url(&mut errors, field, value);
        }

        Validation { normalized, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_valid() {
        let result = ProfileInput::default().validate();
        assert!(result.is_valid());
        assert_eq!(result.normalized, ProfileFields::default());
    }

    #[test]
    fn test_handle_length_bounds() {
        let short = ProfileInput {
            handle: Some("a".to_string()),
            ..Default::default()
        };
        assert!(short.validate().errors.contains("handle"));

        let long = ProfileInput {
            handle: Some("x".repeat(41)),
            ..Default::default()
        };
        assert!(long.validate().errors.contains("handle"));

        let ok = ProfileInput {
            handle: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_valid());
    }

    #[test]
    fn test_links_must_be_urls() {
        let input = ProfileInput {
            website: Some("my site".to_string()),
            social: SocialInput {
                twitter: Some("twitter.com/alice".to_string()),
                youtube: Some("nope".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let result = input.validate();
        assert_eq!(result.errors.get("website"), Some("Not a valid URL"));
        assert_eq!(result.errors.get("youtube"), Some("Not a valid URL"));
        assert!(!result.errors.contains("twitter"));
    }

    #[test]
    fn test_validate_is_pure() {
        let input = ProfileInput {
            handle: Some("alice".to_string()),
            skills: Some("go,rust".to_string()),
            ..Default::default()
        };
        assert_eq!(input.validate(), input.validate());
    }
}
