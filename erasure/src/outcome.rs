//! Validation outcomes.

use std::fmt;
use thiserror::Error;

/// Outcome of validating a value.
///
/// Either [`ValidationOutcome::Valid`] or [`ValidationOutcome::Invalid`], the latter carrying a human-readable message.
/// Two outcomes are equal if they are the same variant and, for [`ValidationOutcome::Invalid`], if their messages are
/// equal.
///
/// # Examples
///
/// ```
/// use erasure::ValidationOutcome;
///
/// assert_eq!(ValidationOutcome::Valid, ValidationOutcome::Valid);
/// assert_eq!(ValidationOutcome::invalid("x"), ValidationOutcome::invalid("x"));
/// assert_ne!(ValidationOutcome::invalid("x"), ValidationOutcome::invalid("y"));
/// assert_ne!(ValidationOutcome::Valid, ValidationOutcome::invalid("x"));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ValidationOutcome {
  Valid,
  Invalid(String),
}

impl ValidationOutcome {
  /// Create an invalid outcome with the given message, stored verbatim.
  pub fn invalid(message: impl Into<String>) -> Self {
    ValidationOutcome::Invalid(message.into())
  }

  pub fn is_valid(&self) -> bool {
    match self {
      ValidationOutcome::Valid => true,
      ValidationOutcome::Invalid(_) => false,
    }
  }

  pub fn is_invalid(&self) -> bool {
    !self.is_valid()
  }

  /// Message of an invalid outcome, if any.
  pub fn message(&self) -> Option<&str> {
    match self {
      ValidationOutcome::Valid => None,
      ValidationOutcome::Invalid(message) => Some(message),
    }
  }

  /// Turn the outcome into a [`Result`], so that it can be propagated with `?`.
  pub fn into_result(self) -> Result<(), InvalidValue> {
    match self {
      ValidationOutcome::Valid => Ok(()),
      ValidationOutcome::Invalid(message) => Err(InvalidValue { message }),
    }
  }
}

impl fmt::Display for ValidationOutcome {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ValidationOutcome::Valid => f.write_str("valid"),
      ValidationOutcome::Invalid(message) => write!(f, "invalid: {}", message),
    }
  }
}

impl<E> From<Result<(), E>> for ValidationOutcome
where
  E: fmt::Display,
{
  fn from(result: Result<(), E>) -> Self {
    match result {
      Ok(()) => ValidationOutcome::Valid,
      Err(e) => ValidationOutcome::Invalid(e.to_string()),
    }
  }
}

/// A single invalid outcome, as an error.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid value: {message}")]
pub struct InvalidValue {
  pub message: String,
}

impl From<InvalidValue> for ValidationOutcome {
  fn from(e: InvalidValue) -> Self {
    ValidationOutcome::Invalid(e.message)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn equality() {
    assert_eq!(ValidationOutcome::Valid, ValidationOutcome::Valid);
    assert_eq!(
      ValidationOutcome::invalid("x"),
      ValidationOutcome::Invalid("x".to_owned())
    );
    assert_ne!(ValidationOutcome::invalid("x"), ValidationOutcome::invalid("y"));
    assert_ne!(ValidationOutcome::Valid, ValidationOutcome::invalid("x"));
    assert_ne!(ValidationOutcome::invalid("x"), ValidationOutcome::Valid);
  }

  #[test]
  fn message_is_stored_verbatim() {
    let outcome = ValidationOutcome::invalid("  must not be empty\n");

    assert!(outcome.is_invalid());
    assert_eq!(outcome.message(), Some("  must not be empty\n"));
    assert_eq!(ValidationOutcome::Valid.message(), None);
  }

  #[test]
  fn result_conversions() {
    assert_eq!(ValidationOutcome::Valid.into_result(), Ok(()));

    let err = ValidationOutcome::invalid("required").into_result().unwrap_err();
    assert_eq!(err.message, "required");
    assert_eq!(err.to_string(), "invalid value: required");
    assert_eq!(
      ValidationOutcome::from(err),
      ValidationOutcome::invalid("required")
    );

    let parsed: Result<(), std::num::ParseIntError> = "nope".parse::<i32>().map(|_| ());
    assert!(ValidationOutcome::from(parsed).is_invalid());
    assert_eq!(
      ValidationOutcome::from(Ok::<(), String>(())),
      ValidationOutcome::Valid
    );
  }

  #[test]
  fn display() {
    assert_eq!(ValidationOutcome::Valid.to_string(), "valid");
    assert_eq!(
      ValidationOutcome::invalid("too short").to_string(),
      "invalid: too short"
    );
  }
}
