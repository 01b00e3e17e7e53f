//! Education entry validation gate.

use super::{FieldErrors, Validate, Validation, check_date, normalize, require};
use crate::profile::EducationInput;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationFields {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

impl Validate for EducationInput {
    type Normalized = EducationFields;

    fn validate(&self) -> Validation<EducationFields> {
        let normalized = EducationFields {
            school: normalize(&self.school),
            degree: normalize(&self.degree),
            fieldofstudy: normalize(&self.fieldofstudy),
            from: normalize(&self.from),
            to: normalize(&self.to),
            current: self.current,
            description: normalize(&self.description),
        };

        let mut errors = FieldErrors::new();
        require(&mut errors, "school", &normalized.school, "School is required");
        require(&mut errors, "degree", &normalized.degree, "Degree is required");
        require(
            &mut errors,
            "fieldofstudy",
            &normalized.fieldofstudy,
            "Field of study is required",
        );
        require(&mut errors, "from", &normalized.from, "From date field is required");
        check_date(&mut errors, "from", &normalized.from, "From date is not a valid date");
        check_date(&mut errors, "to", &normalized.to, "To date is not a valid date");

        Validation { normalized, errors }
    }
}
