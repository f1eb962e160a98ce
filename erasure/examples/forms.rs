//! Validate a heterogeneous form.
//!
//! Run with `RUST_LOG=erasure=trace` to see every field being validated.

use erasure::{field, AnyField, Field, ValidationOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Field)]
#[field(required = "this field is required")]
struct TextField {
  value: Option<String>,
}

#[derive(Clone, Copy, Debug)]
struct Date {
  year: u16,
  month: u8,
  day: u8,
}

#[derive(Debug, Default, Field)]
#[field(validate = "DatePicker::check")]
struct DatePicker {
  value: Option<Date>,
}

impl DatePicker {
  fn check(&self) -> ValidationOutcome {
    match self.value {
      Some(Date { month, day, .. }) if !(1..=12).contains(&month) || !(1..=31).contains(&day) => {
        ValidationOutcome::invalid("not a calendar date")
      }
      _ => ValidationOutcome::Valid,
    }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut first_name = TextField::default();
  first_name.set_value(Some("Ada".to_owned()));

  let last_name = TextField::default();

  let mut birth = DatePicker::default();
  birth.set_value(Some(Date {
    year: 1815,
    month: 13,
    day: 10,
  }));

  if let Some(date) = birth.value() {
    println!("birth year: {}", date.year);
  }

  let fields = vec![
    AnyField::new(first_name),
    AnyField::new(last_name),
    AnyField::new(birth),
  ];

  if field::all_valid(&fields) {
    println!("All fields are valid");
  }

  if let Err(e) = field::validate_all(&fields).into_result() {
    println!("{}", e);
  }
}
