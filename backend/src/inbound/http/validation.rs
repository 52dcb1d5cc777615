//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path ids arrive as strings and labels as free text so that malformed
//! values produce the domain error envelope with field-level details rather
//! than the framework's default rejection.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, UnknownLabel};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidLabel,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidLabel => "invalid_value",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Field name reported for malformed `{id}` path segments.
pub(crate) const ID_FIELD: FieldName = FieldName::new("id");

fn field_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    field_error(
        field,
        ErrorCode::InvalidUuid,
        format!("{} must be a valid UUID", field.as_str()),
        value,
    )
}

/// Parse a path or query id.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a stable snake_case label into its domain enum.
pub(crate) fn parse_label<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.parse().map_err(|err: UnknownLabel| {
        field_error(field, ErrorCode::InvalidLabel, err.to_string(), value)
    })
}

pub(crate) fn parse_optional_label<T>(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.map(|raw| parse_label(raw, field)).transpose()
}

/// Require `value` to lie within `min..=max`.
pub(crate) fn ensure_range(value: i64, min: i64, max: i64, field: FieldName) -> Result<i64, Error> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(field_error(
            field,
            ErrorCode::OutOfRange,
            format!("{} must be between {min} and {max}", field.as_str()),
            &value.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, Frequency};
    use rstest::rstest;

    #[test]
    fn valid_uuids_parse() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), FieldName::new("id")), Ok(id));
    }

    #[test]
    fn invalid_uuid_reports_field_and_value() {
        let err = parse_uuid("bill-1", FieldName::new("id")).expect_err("invalid uuid");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "id");
        assert_eq!(details["value"], "bill-1");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[test]
    fn labels_parse_into_domain_enums() {
        let frequency: Frequency =
            parse_label("quarterly", FieldName::new("frequency")).expect("known label");
        assert_eq!(frequency, Frequency::Quarterly);
    }

    #[test]
    fn unknown_labels_are_invalid_values() {
        let err = parse_label::<Frequency>("hourly", FieldName::new("frequency"))
            .expect_err("unknown label");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "invalid_value");
        assert_eq!(details["field"], "frequency");
        assert!(err.message().contains("hourly"));
    }

    #[test]
    fn absent_optional_labels_are_none() {
        let parsed = parse_optional_label::<Frequency>(None, FieldName::new("frequency"));
        assert_eq!(parsed, Ok(None));
    }

    #[rstest]
    #[case(1, true)]
    #[case(365, true)]
    #[case(0, false)]
    #[case(366, false)]
    fn range_checks_are_inclusive(#[case] value: i64, #[case] ok: bool) {
        assert_eq!(ensure_range(value, 1, 365, FieldName::new("days")).is_ok(), ok);
    }
}
