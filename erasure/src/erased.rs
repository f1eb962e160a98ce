//! Types that support type erasure.

use crate::{
  actor::{Actor, AnyActor},
  field::{AnyField, Field},
};

/// Conversion of a concrete value into its erased wrapper `W`.
///
/// Every [`Field`] converts into an [`AnyField`] and every [`Actor`] converts into an [`AnyActor`] for its action
/// type. This trait is mostly used through the [`erase!`](crate::erase) macro.
pub trait IntoErased<W> {
  fn into_erased(self) -> W;
}

impl<'a, F> IntoErased<AnyField<'a>> for F
where
  F: Field + 'a,
{
  fn into_erased(self) -> AnyField<'a> {
    AnyField::new(self)
  }
}

impl<'a, M> IntoErased<AnyActor<'a, M::Action>> for M
where
  M: Actor + 'a,
{
  fn into_erased(self) -> AnyActor<'a, M::Action> {
    AnyActor::new(self)
  }
}

/// Erase a list of values into a [`Vec`] of wrappers.
///
/// The element type is usually given by the binding, as in `let fields: Vec<AnyField> = erase![a, b, c];`.
///
/// # Examples
///
/// ```
/// use erasure::{erase, field, AnyField, Field, ValidationOutcome};
///
/// struct Text(Option<String>);
///
/// impl Field for Text {
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
///     ValidationOutcome::Valid
///   }
/// }
///
/// struct Flag(Option<bool>);
///
/// impl Field for Flag {
///   type Data = bool;
///
///   fn value(&self) -> Option<&bool> {
///     self.0.as_ref()
///   }
///
///   fn set_value(&mut self, value: Option<bool>) {
///     self.0 = value;
///   }
///
///   fn validate(&self) -> ValidationOutcome {
///     match self.0 {
///       Some(true) => ValidationOutcome::Valid,
///       _ => ValidationOutcome::invalid("terms must be accepted"),
///     }
///   }
/// }
///
/// let fields: Vec<AnyField> = erase![Text(None), Flag(Some(false))];
///
/// assert_eq!(field::first_invalid(&fields).as_deref(), Some("terms must be accepted"));
/// ```
#[macro_export]
macro_rules! erase {
  ($($value:expr),* $(,)?) => {
    vec![$($crate::erased::IntoErased::into_erased($value)),*]
  };
}
