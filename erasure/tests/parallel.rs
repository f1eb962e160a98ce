use erasure::{
  field::{self, SyncField},
  AnyField, ValidationOutcome,
};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

fn counting(hits: &Arc<AtomicUsize>, outcome: ValidationOutcome) -> SyncField<'static> {
  let hits = hits.clone();

  SyncField::from_fn(move || {
    hits.fetch_add(1, Ordering::SeqCst);
    outcome.clone()
  })
}

#[test]
fn parallel_fold_visits_every_field_once() {
  let hits = Arc::new(AtomicUsize::new(0));
  let mut fields: Vec<_> = (0..64)
    .map(|_| counting(&hits, ValidationOutcome::Valid))
    .collect();

  assert!(field::all_valid_par(&fields));
  assert_eq!(hits.load(Ordering::SeqCst), 64);

  fields[17] = counting(&hits, ValidationOutcome::invalid("required"));
  hits.store(0, Ordering::SeqCst);

  assert!(!field::all_valid_par(&fields));
  assert_eq!(hits.load(Ordering::SeqCst), 64);
}

#[test]
fn parallel_report_matches_sequential() {
  let hits = Arc::new(AtomicUsize::new(0));
  let fields: Vec<_> = (0..32)
    .map(|i| {
      if i % 10 == 3 {
        counting(&hits, ValidationOutcome::invalid(format!("field {} is invalid", i)))
      } else {
        counting(&hits, ValidationOutcome::Valid)
      }
    })
    .collect();

  let report = field::validate_all_par(&fields);
  assert_eq!(hits.load(Ordering::SeqCst), 32);
  assert_eq!(report.first_invalid(), Some("field 3 is invalid"));

  let erased: Vec<AnyField> = fields.into_iter().map(AnyField::from).collect();
  assert_eq!(report, field::validate_all(&erased));
}
