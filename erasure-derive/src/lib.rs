//! Derive macros for the [erasure](https://crates.io/crates/erasure) crate.
//!
//! You shouldn’t depend on this crate directly: enable the `derive` feature of `erasure` (on by default) and use the
//! re-exported macros from there.

mod field;

use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{parse_macro_input, DeriveInput};

/// Implement `erasure::Field` for a struct holding its value in an `Option<T>`.
///
/// The value field is the one marked with `#[field(value)]`, or the field named `value` if none is marked. `Data` is
/// set to `T`.
///
/// Validation is configured with attributes on the struct:
///
/// - `#[field(required = "message")]`: the field is invalid with `message` when the value is `None`.
/// - `#[field(validate = "path::to::function")]`: call `function(&self)`, which must return a
///   `ValidationOutcome`. If `required` is also present, the function is only called when a value is set.
///
/// Without any of them, the field is always valid.
///
/// The generated impl names items through `::erasure`. If the crate is renamed in `Cargo.toml` or re-exported from
/// another crate, give its path with `#[field(crate = "path::to::erasure")]`.
#[proc_macro_derive(Field, attributes(field))]
pub fn derive_field(tokens: TokenStream) -> TokenStream {
  let input = parse_macro_input!(tokens as DeriveInput);

  match field::FieldDerive::from_input(input) {
    Ok(derive) => derive.to_token_stream().into(),
    Err(e) => e.to_compile_error().into(),
  }
}
