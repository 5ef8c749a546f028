//! Request validation shared by the REST, GraphQL and gRPC adapters.
//!
//! Name must be non-blank and 3 to 50 characters long; code must be
//! non-blank and 2 to 3 characters long. A missing field only breaks the
//! non-blank rule. Violations are collected across both fields (name first)
//! and reported as one validation failure.

use crate::domain::{CountryPatch, Error, NewCountry, Violation};

/// Rule name reported when a value is empty or whitespace only.
pub const NOT_BLANK: &str = "NotBlank";
/// Rule name reported when a value's length is out of range.
pub const SIZE: &str = "Size";
/// Message attached to every `NotBlank` violation.
pub const NOT_BLANK_MESSAGE: &str = "must not be blank";

/// Length and message constraints for one text field.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    min: usize,
    max: usize,
    message: &'static str,
}

const NAME_RULE: FieldRule = FieldRule {
    min: 3,
    max: 50,
    message: "invalid country name",
};

const CODE_RULE: FieldRule = FieldRule {
    min: 2,
    max: 3,
    message: "invalid country code",
};

impl FieldRule {
    fn check(self, value: Option<&str>, violations: &mut Vec<Violation>) {
        let Some(value) = value else {
            violations.push(Violation::new(NOT_BLANK, NOT_BLANK_MESSAGE));
            return;
        };
        if value.trim().is_empty() {
            violations.push(Violation::new(NOT_BLANK, NOT_BLANK_MESSAGE));
        }
        let length = value.chars().count();
        if length < self.min || length > self.max {
            violations.push(Violation::new(SIZE, self.message));
        }
    }
}

fn finish<T>(violations: Vec<Violation>, value: T) -> Result<T, Error> {
    if violations.is_empty() {
        Ok(value)
    } else {
        Err(Error::validation(violations))
    }
}

/// Validate a create request; `None` marks a field missing from the request.
///
/// # Examples
/// ```
/// use country_service::domain::MULTIPLE_VALIDATION_ERRORS;
/// use country_service::inbound::validation::validate_new_country;
///
/// assert!(validate_new_country(Some("Spain"), Some("SP")).is_ok());
/// let err = validate_new_country(Some("Jp"), Some("J")).expect_err("both too short");
/// assert_eq!(err.message(), MULTIPLE_VALIDATION_ERRORS);
/// ```
pub fn validate_new_country(name: Option<&str>, code: Option<&str>) -> Result<NewCountry, Error> {
    let mut violations = Vec::new();
    NAME_RULE.check(name, &mut violations);
    CODE_RULE.check(code, &mut violations);
    match (name, code) {
        (Some(name), Some(code)) => finish(violations, NewCountry::new(name, code)),
        _ => Err(Error::validation(violations)),
    }
}

/// Validate a partial update; absent and empty fields are skipped.
pub fn validate_patch(name: Option<String>, code: Option<String>) -> Result<CountryPatch, Error> {
    let mut violations = Vec::new();
    if let Some(value) = name.as_deref().filter(|value| !value.is_empty()) {
        NAME_RULE.check(Some(value), &mut violations);
    }
    if let Some(value) = code.as_deref().filter(|value| !value.is_empty()) {
        CODE_RULE.check(Some(value), &mut violations);
    }
    finish(violations, CountryPatch::new(name, code))
}
