//! Field-level validation shared by the domain drafts.
//!
//! Drafts normalise their inputs (trimming text, collapsing blank optional
//! strings to `None`) and report the first violated rule as a
//! [`FieldViolation`]. Field names use the camelCase spelling exposed by the
//! HTTP adapter so clients can map violations back onto form inputs.

use serde_json::json;

use super::Error;

/// A single rule violated by an input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldViolation {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldViolation {
    /// Build a violation with an explicit code and message.
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// The field is missing or blank.
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "required", format!("{field} must not be empty"))
    }

    /// The field exceeds `max` characters.
    pub fn too_long(field: &'static str, max: usize) -> Self {
        Self::new(
            field,
            "too_long",
            format!("{field} must be at most {max} characters"),
        )
    }

    /// The field must be zero or positive.
    pub fn negative(field: &'static str) -> Self {
        Self::new(field, "negative", format!("{field} must not be negative"))
    }

    /// The field must lie within `min..=max`.
    pub fn out_of_range(field: &'static str, min: i64, max: i64) -> Self {
        Self::new(
            field,
            "out_of_range",
            format!("{field} must be between {min} and {max}"),
        )
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Stable machine-readable violation code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<FieldViolation> for Error {
    fn from(value: FieldViolation) -> Self {
        let FieldViolation {
            field,
            code,
            message,
        } = value;
        Error::invalid_request(message).with_details(json!({
            "field": field,
            "code": code,
        }))
    }
}

/// Trim `value` and require it to be non-empty and at most `max` characters.
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::required(field));
    }
    if trimmed.chars().count() > max {
        return Err(FieldViolation::too_long(field, max));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional value, mapping blank strings to `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, FieldViolation> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > max => Err(FieldViolation::too_long(field, max)),
        Some(text) => Ok(Some(text.to_owned())),
    }
}

/// Require a money amount in minor units to be zero or positive.
pub fn non_negative_cents(field: &'static str, value: i64) -> Result<i64, FieldViolation> {
    if value < 0 {
        return Err(FieldViolation::negative(field));
    }
    Ok(value)
}

/// Require a finite, non-negative quantity.
pub fn non_negative_quantity(field: &'static str, value: f64) -> Result<f64, FieldViolation> {
    if !value.is_finite() || value < 0.0 {
        return Err(FieldViolation::negative(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("  Gas bill ", Ok("Gas bill".to_owned()))]
    #[case(" abcdefghij ", Ok("abcdefghij".to_owned()))]
    #[case("   ", Err(FieldViolation::required("name")))]
    #[case("abcdefghijk", Err(FieldViolation::too_long("name", 10)))]
    fn required_text_normalises_and_checks_length(
        #[case] input: &str,
        #[case] expected: Result<String, FieldViolation>,
    ) {
        assert_eq!(required_text("name", input, 10), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  note  "), Some("note"))]
    fn optional_text_collapses_blank_values(
        #[case] input: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let normalised = optional_text("notes", input, 100).expect("valid optional text");
        assert_eq!(normalised.as_deref(), expected);
    }

    #[test]
    fn negative_cents_are_rejected() {
        let violation = non_negative_cents("amountCents", -1).expect_err("negative amount");
        assert_eq!(violation.code(), "negative");
        assert_eq!(violation.field(), "amountCents");
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-0.5)]
    fn invalid_quantities_are_rejected(#[case] value: f64) {
        assert!(non_negative_quantity("quantity", value).is_err());
    }

    #[test]
    fn violation_converts_to_invalid_request_with_details() {
        let error = Error::from(FieldViolation::required("title"));
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "title must not be empty");
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "title");
        assert_eq!(details["code"], "required");
    }
}
