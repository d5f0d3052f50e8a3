//! Whole-dataset transformations: serial numbering, attribute deletion,
//! counting and deduplication.
//!
//! All functions borrow the input and return a fresh [`Dataset`]; the
//! caller decides whether to replace what it holds.

use crate::dataset::{Dataset, RecordId};
use serde_json::Value;
use std::collections::HashSet;

/// Sets `field` on every record to its 1-based position.
///
/// An existing value is overwritten in place; otherwise the field is
/// appended to the record.
pub fn serial_number(dataset: &Dataset, field: &str) -> Dataset {
    let numbered: Dataset = dataset
        .iter()
        .zip(1_u64..)
        .map(|(record, position)| {
            let mut record = record.clone();
            record.insert(field.to_owned(), Value::from(position));
            record
        })
        .collect();

    tracing::info!("Numbered {} records into '{field}'", numbered.len());
    numbered
}

/// Removes `field` from every record that has it.
pub fn delete_attribute(dataset: &Dataset, field: &str) -> Dataset {
    let mut affected = 0_usize;
    let result: Dataset = dataset
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if record.shift_remove(field).is_some() {
                affected += 1;
            }
            record
        })
        .collect();

    tracing::info!("Deleted '{field}' from {affected} of {} records", result.len());
    result
}

/// Number of records.
pub fn count(dataset: &Dataset) -> usize {
    dataset.len()
}

/// Keeps the first record for each identity, in original order.
///
/// Records without `id_field` (or with `null`) share one identity, so only
/// the first of them survives.
pub fn remove_duplicates(dataset: &Dataset, id_field: &str) -> Dataset {
    let mut seen = HashSet::with_capacity(dataset.len());
    let unique: Dataset = dataset
        .iter()
        .filter(|record| seen.insert(RecordId::of(record, id_field)))
        .cloned()
        .collect();

    tracing::info!(
        "Removed {} duplicate records by '{id_field}', {} remain",
        dataset.len() - unique.len(),
        unique.len()
    );
    unique
}
