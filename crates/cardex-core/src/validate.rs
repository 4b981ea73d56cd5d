//! Field rules checked before any mutating store call.
//!
//! Rules run in form order and stop at the first failure; messages are never
//! aggregated. Lengths count Unicode scalar values, and phone numbers are
//! checked for length only (punctuation is not stripped).

use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;

use crate::{
  contact::{ContactFields, ContactPatch, Field},
  error::ValidationError,
};

pub const NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const PHONE_MIN: usize = 10;
pub const PHONE_MAX: usize = 15;

/// One local part, one `@`, and a dotted domain with a non-empty suffix.
static EMAIL_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern compiles"));

/// Check a complete draft.
pub fn contact(fields: &ContactFields) -> Result<(), ValidationError> {
  Field::iter().try_for_each(|field| check(field, fields.get(field)))
}

/// Check only the fields a partial update carries.
pub fn patch(patch: &ContactPatch) -> Result<(), ValidationError> {
  Field::iter().try_for_each(|field| match patch.get(field) {
    Some(value) => check(field, value),
    None => Ok(()),
  })
}

/// Check a single field value.
pub fn check(field: Field, value: &str) -> Result<(), ValidationError> {
  let len = value.chars().count();

  // Email length is checked before its shape.
  let message = match field {
    Field::FirstName if len == 0 => "First name is required",
    Field::FirstName if len > NAME_MAX => "First name is too long",
    Field::LastName if len == 0 => "Last name is required",
    Field::LastName if len > NAME_MAX => "Last name is too long",
    Field::Email if len > EMAIL_MAX => "Email is too long",
    Field::Email if !EMAIL_SHAPE.is_match(value) => "Please enter a valid email address",
    Field::PhoneNumber if len < PHONE_MIN => "Phone number should be at least 10 characters",
    Field::PhoneNumber if len > PHONE_MAX => "Phone number is too long",
    _ => return Ok(()),
  };

  Err(ValidationError { field, message })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid() -> ContactFields {
    ContactFields {
      first_name:   "Jo".into(),
      last_name:    "Lee".into(),
      email:        "a@b.co".into(),
      phone_number: "1234567890".into(),
    }
  }

  fn message(fields: &ContactFields) -> &'static str { contact(fields).unwrap_err().message }

  #[test]
  fn minimal_draft_passes() {
    assert!(contact(&valid()).is_ok());
  }

  #[test]
  fn names_are_required_and_bounded() {
    let mut f = valid();
    f.first_name.clear();
    assert_eq!(message(&f), "First name is required");

    f.first_name = "x".repeat(51);
    assert_eq!(message(&f), "First name is too long");

    f.first_name = "x".repeat(50);
    f.last_name.clear();
    assert_eq!(message(&f), "Last name is required");
  }

  #[test]
  fn email_without_at_fails_shape_rule() {
    let mut f = valid();
    f.email = "bad-email".into();
    let err = contact(&f).unwrap_err();
    assert_eq!(err.field, Field::Email);
    assert_eq!(err.message, "Please enter a valid email address");
  }

  #[test]
  fn email_shape_edge_cases() {
    for bad in ["", "a@b", "a@b.", "@b.co", "a@@b.co", "a@b@c.co"] {
      assert!(check(Field::Email, bad).is_err(), "{bad:?} should fail");
    }
    for good in ["a@b.co", "first.last@sub.example.org"] {
      assert!(check(Field::Email, good).is_ok(), "{good:?} should pass");
    }
  }

  #[test]
  fn long_email_fails_length_rule_regardless_of_shape() {
    let mut f = valid();
    f.email = format!("{}@b.co", "a".repeat(96));
    assert_eq!(f.email.len(), 101);
    assert_eq!(message(&f), "Email is too long");

    f.email = "z".repeat(101);
    assert_eq!(message(&f), "Email is too long");
  }

  #[test]
  fn phone_length_bounds() {
    let mut f = valid();
    f.phone_number = "1".repeat(9);
    assert_eq!(message(&f), "Phone number should be at least 10 characters");

    f.phone_number = "1".repeat(15);
    assert!(contact(&f).is_ok());

    f.phone_number = "1".repeat(16);
    assert_eq!(message(&f), "Phone number is too long");

    f.phone_number = "(555) 123-4567".into();
    assert!(contact(&f).is_ok());
  }

  #[test]
  fn first_failing_rule_wins() {
    let f = ContactFields::default();
    let err = contact(&f).unwrap_err();
    assert_eq!(err.field, Field::FirstName);
  }

  #[test]
  fn lengths_count_characters_not_bytes() {
    assert!(check(Field::FirstName, &"é".repeat(50)).is_ok());
  }

  #[test]
  fn patch_checks_only_present_fields() {
    let p = ContactPatch {
      phone_number: Some("123".into()),
      ..ContactPatch::default()
    };
    assert_eq!(patch(&p).unwrap_err().field, Field::PhoneNumber);
    assert!(patch(&ContactPatch::default()).is_ok());
  }
}
