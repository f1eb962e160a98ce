//! Fields and their erased form.
//!
//! A [`Field`] holds an optional value of an associated [`Field::Data`] type and knows how to validate itself. Because
//! of that associated type, a text field (`Data = String`) and a date field (`Data = Date`) cannot live in the same
//! `Vec<Box<dyn Field<…>>>`. [`AnyField`] forgets everything about the concrete field but its validation function,
//! which makes heterogeneous, ordered collections of fields possible.
//!
//! Aggregate operations over such collections live at the bottom of this module: [`all_valid`], [`validate_all`] and
//! [`first_invalid`]. All of them evaluate every field exactly once, even after an invalid one has been found.
//!
//! [`AnyField`] puts no thread bound on the fields it wraps. [`SyncField`] is its thread-safe twin, used by the
//! parallel folds of the `rayon` feature.

use crate::outcome::ValidationOutcome;
use std::{
  cell::RefCell,
  fmt,
  rc::Rc,
  sync::{Arc, PoisonError, RwLock},
};
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A value holder that can validate its content.
///
/// Implementing [`Field`] by hand is straightforward, but most of the time you will want to use
/// `#[derive(Field)]` (enabled by the `derive` feature) instead.
///
/// Because of [`Field::Data`], fields cannot be used directly as elements of a uniform collection:
///
/// ```compile_fail
/// use erasure::Field;
///
/// // error: the value of the associated type `Data` must be specified
/// let fields: Vec<Box<dyn Field>> = Vec::new();
/// ```
///
/// Wrap them in [`AnyField`] instead.
pub trait Field {
  /// Type of the value held by the field.
  type Data;

  fn value(&self) -> Option<&Self::Data>;

  fn set_value(&mut self, value: Option<Self::Data>);

  fn validate(&self) -> ValidationOutcome;
}

/// Erased field.
///
/// An [`AnyField`] only retains the validation function of the field it was built from. The function is bound over the
/// field itself (owned, borrowed or shared), never over a previously computed outcome, so a field mutated through a
/// shared handle is seen as mutated by the wrapper.
///
/// Cloning an [`AnyField`] is cheap and yields a wrapper bound to the same function.
///
/// # Examples
///
/// ```
/// use erasure::{field, AnyField, Field, ValidationOutcome};
///
/// struct Name(Option<String>);
///
/// impl Field for Name {
///   type Data = String;
///
///   fn value(&self) -> Option<&String> {
///     self.0.as_ref()
///   }
///
///   fn set_value(&mut self, value: Option<String>) {
///     self.0 = value;
///   }
///
///   fn validate(&self) -> ValidationOutcome {
///     match self.0 {
///       Some(_) => ValidationOutcome::Valid,
///       None => ValidationOutcome::invalid("required"),
///     }
///   }
/// }
///
/// struct Age(Option<u8>);
///
/// impl Field for Age {
///   type Data = u8;
///
///   fn value(&self) -> Option<&u8> {
///     self.0.as_ref()
///   }
///
///   fn set_value(&mut self, value: Option<u8>) {
///     self.0 = value;
///   }
///
///   fn validate(&self) -> ValidationOutcome {
///     ValidationOutcome::Valid
///   }
/// }
///
/// let fields = vec![
///   AnyField::new(Name(Some("Ada".to_owned()))),
///   AnyField::new(Age(None)),
///   AnyField::new(Name(None)),
/// ];
///
/// assert!(!field::all_valid(&fields));
/// assert_eq!(field::first_invalid(&fields).as_deref(), Some("required"));
/// ```
#[derive(Clone)]
pub struct AnyField<'a> {
  validate: Rc<dyn Fn() -> ValidationOutcome + 'a>,
}

impl<'a> AnyField<'a> {
  /// Erase a field by moving it into the wrapper.
  pub fn new<F>(field: F) -> Self
  where
    F: Field + 'a,
  {
    Self::from_fn(move || field.validate())
  }

  /// Erase a borrowed field.
  pub fn borrowed<F>(field: &'a F) -> Self
  where
    F: Field,
  {
    Self::from_fn(move || field.validate())
  }

  /// Erase a field shared behind a [`RefCell`].
  ///
  /// The cell is borrowed every time [`AnyField::validate`] is called, so updates made through other handles are
  /// visible.
  ///
  /// # Panics
  ///
  /// [`AnyField::validate`] panics if the field is mutably borrowed at that moment.
  pub fn shared<F>(field: Rc<RefCell<F>>) -> Self
  where
    F: Field + 'a,
  {
    Self::from_fn(move || field.borrow().validate())
  }

  /// Bind any nullary function returning a [`ValidationOutcome`].
  pub fn from_fn(validate: impl Fn() -> ValidationOutcome + 'a) -> Self {
    Self {
      validate: Rc::new(validate),
    }
  }

  /// Invoke the bound validation function.
  ///
  /// Side effects and panics of the bound function are forwarded as-is.
  pub fn validate(&self) -> ValidationOutcome {
    (self.validate)()
  }
}

/// Erased field that can be shared between threads.
///
/// Same as [`AnyField`], but the bound function must be [`Send`] and [`Sync`]. This is the wrapper taken by the
/// parallel folds (`rayon` feature). A [`SyncField`] converts into an [`AnyField`] to take part in the sequential folds.
#[derive(Clone)]
pub struct SyncField<'a> {
  validate: Arc<dyn Fn() -> ValidationOutcome + Send + Sync + 'a>,
}

impl<'a> SyncField<'a> {
  pub fn new<F>(field: F) -> Self
  where
    F: Field + Send + Sync + 'a,
  {
    Self::from_fn(move || field.validate())
  }

  pub fn borrowed<F>(field: &'a F) -> Self
  where
    F: Field + Sync,
  {
    Self::from_fn(move || field.validate())
  }

  /// Erase a field shared behind a lock, read on every validation. A poisoned lock is still read.
  pub fn shared<F>(field: Arc<RwLock<F>>) -> Self
  where
    F: Field + Send + Sync + 'a,
  {
    Self::from_fn(move || {
      let field = field.read().unwrap_or_else(PoisonError::into_inner);
      field.validate()
    })
  }

  pub fn from_fn(validate: impl Fn() -> ValidationOutcome + Send + Sync + 'a) -> Self {
    Self {
      validate: Arc::new(validate),
    }
  }

  pub fn validate(&self) -> ValidationOutcome {
    (self.validate)()
  }
}

impl<'a> From<SyncField<'a>> for AnyField<'a> {
  fn from(field: SyncField<'a>) -> Self {
    AnyField::from_fn(move || field.validate())
  }
}

impl fmt::Debug for SyncField<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("SyncField").finish_non_exhaustive()
  }
}

impl fmt::Debug for AnyField<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("AnyField").finish_non_exhaustive()
  }
}

/// Outcomes of validating an ordered sequence of fields, in the same order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationReport {
  outcomes: Vec<ValidationOutcome>,
}

impl ValidationReport {
  pub fn new(outcomes: Vec<ValidationOutcome>) -> Self {
    Self { outcomes }
  }

  /// Whether all outcomes are [`ValidationOutcome::Valid`]. An empty report is valid.
  pub fn is_valid(&self) -> bool {
    self.outcomes.iter().all(ValidationOutcome::is_valid)
  }

  pub fn len(&self) -> usize {
    self.outcomes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.outcomes.is_empty()
  }

  pub fn outcomes(&self) -> &[ValidationOutcome] {
    &self.outcomes
  }

  /// Message of the first invalid outcome.
  pub fn first_invalid(&self) -> Option<&str> {
    self.invalid_messages().next()
  }

  /// Messages of all invalid outcomes, in order.
  pub fn invalid_messages(&self) -> impl Iterator<Item = &str> {
    self.outcomes.iter().filter_map(ValidationOutcome::message)
  }

  pub fn into_outcomes(self) -> Vec<ValidationOutcome> {
    self.outcomes
  }

  pub fn into_result(self) -> Result<(), InvalidFields> {
    let messages: Vec<_> = self
      .outcomes
      .into_iter()
      .filter_map(|outcome| match outcome {
        ValidationOutcome::Valid => None,
        ValidationOutcome::Invalid(message) => Some(message),
      })
      .collect();

    if messages.is_empty() {
      Ok(())
    } else {
      Err(InvalidFields { messages })
    }
  }
}

/// Error returned by [`ValidationReport::into_result`] when at least one field is invalid.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{} invalid field(s): {}", .messages.len(), .messages.join(", "))]
pub struct InvalidFields {
  pub messages: Vec<String>,
}

/// Fold fields into a single boolean, `true` if they are all valid.
///
/// This is a left fold over the whole sequence starting from `true`; it never stops early, so every field is validated
/// exactly once, even after an invalid one.
pub fn all_valid<'f, 'a: 'f, I>(fields: I) -> bool
where
  I: IntoIterator<Item = &'f AnyField<'a>>,
{
  let (count, valid) = fields.into_iter().fold((0usize, true), |(count, valid), field| {
    // validate first: && would otherwise skip the remaining fields
    let field_valid = field.validate() == ValidationOutcome::Valid;
    (count + 1, field_valid && valid)
  });

  debug!(count, valid, "fields folded");
  valid
}

/// Validate every field once, in order, and keep all the outcomes.
pub fn validate_all<'f, 'a: 'f, I>(fields: I) -> ValidationReport
where
  I: IntoIterator<Item = &'f AnyField<'a>>,
{
  let outcomes: Vec<_> = fields
    .into_iter()
    .enumerate()
    .map(|(index, field)| {
      let outcome = field.validate();
      trace!(index, %outcome, "field validated");
      outcome
    })
    .collect();

  let report = ValidationReport::new(outcomes);
  debug!(
    count = report.len(),
    invalid = report.invalid_messages().count(),
    "fields validated"
  );

  report
}

/// Message of the first invalid field, if any. All fields are validated.
pub fn first_invalid<'f, 'a: 'f, I>(fields: I) -> Option<String>
where
  I: IntoIterator<Item = &'f AnyField<'a>>,
{
  validate_all(fields).into_result().err().and_then(|e| e.messages.into_iter().next())
}

/// Parallel version of [`all_valid`]. Every field is still validated exactly once.
#[cfg(feature = "rayon")]
pub fn all_valid_par(fields: &[SyncField]) -> bool {
  let valid = fields
    .par_iter()
    .map(|field| field.validate() == ValidationOutcome::Valid)
    .reduce(|| true, |a, b| a && b);

  debug!(count = fields.len(), valid, "fields folded in parallel");
  valid
}

/// Parallel version of [`validate_all`]. Outcomes keep the order of `fields`.
#[cfg(feature = "rayon")]
pub fn validate_all_par(fields: &[SyncField]) -> ValidationReport {
  let outcomes: Vec<_> = fields.par_iter().map(SyncField::validate).collect();
  let report = ValidationReport::new(outcomes);

  debug!(
    count = report.len(),
    invalid = report.invalid_messages().count(),
    "fields validated in parallel"
  );

  report
}
