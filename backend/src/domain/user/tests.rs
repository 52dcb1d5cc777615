//! Tests for account identity values.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[test]
fn user_id_round_trips_through_uuid() {
    let id = UserId::new(VALID_ID).expect("valid id");
    let copy = UserId::from_uuid(*id.as_uuid());
    assert_eq!(id, copy);
    assert_eq!(copy.as_ref(), VALID_ID);
}

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  Ada.Lovelace@Example.org ", "ada.lovelace@example.org")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Email::new(raw).expect("valid email").as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("a@b@c", UserValidationError::InvalidEmail)]
#[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
}

#[test]
fn email_rejects_overlong_input() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        Email::new(raw).expect_err("too long"),
        UserValidationError::EmailTooLong { max: EMAIL_MAX }
    );
}

#[rstest]
#[case("Ada Lovelace")]
#[case("ada_99")]
#[case("abc")]
fn display_name_accepts_valid_values(#[case] raw: &str) {
    assert_eq!(DisplayName::new(raw).expect("valid").as_ref(), raw);
}

#[rstest]
#[case("   ", UserValidationError::EmptyDisplayName)]
#[case("ab", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
#[case("bad$char", UserValidationError::DisplayNameInvalidCharacters)]
fn display_name_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw).expect_err("invalid"), expected);
}

#[test]
fn display_name_rejects_overlong_values() {
    let raw = "a".repeat(DISPLAY_NAME_MAX + 1);
    assert_eq!(
        DisplayName::new(raw).expect_err("too long"),
        UserValidationError::DisplayNameTooLong {
            max: DISPLAY_NAME_MAX
        }
    );
}
