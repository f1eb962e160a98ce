//! Erasure, type erasure for capabilities carrying associated types.
//!
//! Traits with associated types are a great way to tie a capability to the data it operates on. A form field knows
//! which kind of value it holds; a character knows which kind of action it performs. However, that association comes
//! at a price: such traits cannot be used directly to build uniform collections. A `Vec<Box<dyn Field>>` doesn’t type
//! check, because the compiler needs to know the associated type, and once it’s fixed, a text field and a date field
//! cannot live in the same vector anymore.
//!
//! This crate provides the usual answer to that problem: _type erasure_. A wrapper type owns a closure bound to the
//! one operation you care about, forgetting everything else about the concrete type it was built from.
//!
//! # Erasing fields
//!
//! A [`Field`] holds an optional value of type [`Field::Data`] and can validate itself, returning a
//! [`ValidationOutcome`]. [`AnyField`] only keeps the validation function around, so fields of any data type can be
//! stored together and folded into a single answer with [`field::all_valid`], or into a full
//! [`field::ValidationReport`] with [`field::validate_all`]. Those folds never stop early: every field is validated,
//! so that all the errors can be reported at once.
//!
//! # Erasing actors
//!
//! An [`Actor`] performs an action of type [`Actor::Action`]. Here, erasing the action type would be wrong: a flyer
//! cannot be asked to swim. [`AnyActor<A>`] thus erases the concrete actor but keeps the action type as part of its
//! own type. Two actors acting on different action types are different types, and mixing them is rejected by the
//! compiler.
//!
//! # Features
//!
//! - `derive` (enabled by default): `#[derive(Field)]`, implementing [`Field`] for structs holding an `Option<T>`.
//! - `rayon`: parallel versions of the folds over [`SyncField`], `field::all_valid_par` and `field::validate_all_par`.
//!   Their tests only run with `cargo test --features rayon`.
//!
//! # Logging
//!
//! The crate logs through [tracing]. Nothing is logged above the `debug` level and no subscriber is installed.
//!
//! [tracing]: https://crates.io/crates/tracing

pub mod actor;
pub mod erased;
pub mod field;
pub mod outcome;

pub use crate::{
  actor::{Actor, AnyActor},
  erased::IntoErased,
  field::{AnyField, Field, InvalidFields, SyncField, ValidationReport},
  outcome::{InvalidValue, ValidationOutcome},
};

#[cfg(feature = "derive")]
pub use erasure_derive::Field;
