//! Experience entry validation gate.

use super::{FieldErrors, Validate, Validation, check_date, normalize, require};
use crate::profile::ExperienceInput;

/// Normalized experience entry; absent strings are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

impl Validate for ExperienceInput {
    type Normalized = ExperienceFields;

    fn validate(&self) -> Validation<ExperienceFields> {
        let normalized = ExperienceFields {
            title: normalize(&self.title),
            company: normalize(&self.company),
            location: normalize(&self.location),
            from: normalize(&self.from),
            to: normalize(&self.to),
            current: self.current,
            description: normalize(&self.description),
        };

        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &normalized.title, "Job title field is required");
        require(&mut errors, "company", &normalized.company, "Company field is required");
        require(&mut errors, "from", &normalized.from, "From date field is required");
        check_date(&mut errors, "from", &normalized.from, "From date is not a valid date");
        check_date(&mut errors, "to", &normalized.to, "To date is not a valid date");

        Validation { normalized, errors }
    }
}
