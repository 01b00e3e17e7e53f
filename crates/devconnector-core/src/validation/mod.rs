//! Validation gates for caller-supplied field records.
//!
//! Every gate follows the same two steps: normalize each recognized field
//! (absent becomes the empty sentinel), then run required/shape checks on the
//! normalized value. A gate never touches storage.
//!
//! # Module Structure
//!
//! - `profile`: profile-level fields (`ProfileFields`)
//! - `experience`: experience entries (`ExperienceFields`)
//! - `education`: education entries (`EducationFields`)

mod education;
mod experience;
mod profile;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

pub use education::EducationFields;
pub use experience::ExperienceFields;
pub use profile::{ProfileFields, SocialFields};

/// Field-level error messages keyed by field name.
///
/// Serializes as a flat `{field: message}` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping holding exactly one error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Records an error for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// Result of running a validation gate.
///
/// `normalized` is always populated, even when the input is invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation<T> {
    pub normalized: T,
    pub errors: FieldErrors,
}

impl<T> Validation<T> {
    /// `true` iff no field produced an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into the normalized record, or `ValidationFailed`.
    pub fn into_result(self) -> Result<T> {
        if self.errors.is_empty() {
            Ok(self.normalized)
        } else {
            Err(ProfileError::ValidationFailed(self.errors))
        }
    }
}

/// A caller input record with a validation gate.
///
/// Implementations must be pure: the same input always yields the same
/// normalized record and errors.
pub trait Validate {
    type Normalized;

    fn validate(&self) -> Validation<Self::Normalized>;
}

// ============================================================================
// Shared normalize/check helpers
// ============================================================================

/// Coerces an optional field to a string; absent becomes `""`.
pub(crate) fn normalize(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Maps the empty sentinel back to "not supplied".
pub(crate) fn supplied(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.is_empty() {
        errors.insert(field, message);
    }
}

/// Checks an optional date field; empty values are left to `require`.
pub(crate) fn check_date(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if !value.is_empty() && parse_entry_date(value).is_none() {
        errors.insert(field, message);
    }
}

/// Checks an optional link field; empty values pass.
pub(crate) fn check_url(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.is_empty() && !is_url(value) {
        errors.insert(field, "Not a valid URL");
    }
}

/// Parses the date formats accepted for experience/education entries:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    match value.split('-').collect::<Vec<_>>().as_slice() {
        [year] if year.len() == 4 && all_digits(year) => {
            NaiveDate::parse_from_str(&format!("{year}-01-01"), "%Y-%m-%d").ok()
        }
        [year, month] if year.len() == 4 && all_digits(year) && all_digits(month) => {
            NaiveDate::parse_from_str(&format!("{year}-{month}-01"), "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

/// Lenient URL check: a missing scheme is accepted as long as the remainder
/// parses as an http URL with a dotted host.
pub fn is_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let parsed = match url::Url::parse(value) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            url::Url::parse(&format!("http://{value}"))
        }
        Err(e) => Err(e),
    };
    match parsed {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|host| host.contains('.'))
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_date_formats() {
        assert_eq!(
            parse_entry_date("2020"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(
            parse_entry_date("2020-06"),
            NaiveDate::from_ymd_opt(2020, 6, 1)
        );
        assert_eq!(
            parse_entry_date("2020-06-15"),
            NaiveDate::from_ymd_opt(2020, 6, 15)
        );
        assert_eq!(
            parse_entry_date("2020-06-15T10:00:00Z"),
            NaiveDate::from_ymd_opt(2020, 6, 15)
        );
        assert_eq!(parse_entry_date("someday"), None);
        assert_eq!(parse_entry_date("20"), None);
        assert_eq!(parse_entry_date("2020-13"), None);
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("example.com/alice"));
        assert!(is_url("http://twitter.com/alice"));
        assert!(!is_url("not a url"));
        assert!(!is_url("alice"));
        assert!(!is_url("mailto:alice@example.com"));
    }

    #[test]
    fn test_validation_into_result() {
        let ok = Validation {
            normalized: 1,
            errors: FieldErrors::new(),
        };
        assert!(ok.is_valid());
        assert_eq!(ok.into_result().unwrap(), 1);

        let failed = Validation {
            normalized: 2,
            errors: FieldErrors::single("title", "required"),
        };
        assert!(!failed.is_valid());
        assert!(failed.into_result().unwrap_err().is_validation_failed());
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("school", "School is required");
        errors.insert("degree", "Degree is required");
        assert_eq!(
            errors.to_string(),
            "degree: Degree is required, school: School is required"
        );
    }
}
