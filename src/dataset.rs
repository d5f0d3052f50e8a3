//! In-memory dataset model.
//!
//! A [`Dataset`] is an ordered list of [`Record`]s, each a JSON object whose
//! key order is preserved. Operations never mutate a dataset in place; they
//! borrow one and return a new one.

pub mod io;
pub mod text;

use serde::Serialize;
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

pub use io::{load_dataset, parse_dataset, write_json};
pub use text::{search_text, spaced_json};

/// One JSON object of the input array.
pub type Record = Map<String, Value>;

/// Ordered sequence of records loaded from a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Identity of a record, read from its identifier field.
///
/// A missing field and an explicit `null` are the same identity. Present
/// values compare by their compact JSON text, so `1` and `"1"` differ.
#[derive(Debug, Clone)]
pub enum RecordId {
    Missing,
    Present { key: String, value: Value },
}

impl RecordId {
    pub fn of(record: &Record, id_field: &str) -> Self {
        match record.get(id_field) {
            None | Some(Value::Null) => Self::Missing,
            Some(value) => Self::Present {
                key: value.to_string(),
                value: value.clone(),
            },
        }
    }

    /// JSON form used in statistics output; the missing sentinel is `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Present { value, .. } => value.clone(),
        }
    }

    fn key(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Present { key, .. } => Some(key),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    #[test]
    fn test_missing_and_null_ids_share_identity() {
        let missing = RecordId::of(&record(json!({"name": "a"})), "_id");
        let null = RecordId::of(&record(json!({"_id": null})), "_id");
        assert_eq!(missing, null);
        assert_eq!(missing.to_json(), Value::Null);
    }

    #[test]
    fn test_ids_compare_by_json_text() {
        let number = RecordId::of(&record(json!({"_id": 1})), "_id");
        let string = RecordId::of(&record(json!({"_id": "1"})), "_id");
        let same = RecordId::of(&record(json!({"_id": 1, "x": true})), "_id");
        assert_ne!(number, string);
        assert_eq!(number, same);
        assert_eq!(string.to_json(), json!("1"));
    }

    #[test]
    fn test_nested_ids_are_supported() {
        let a = RecordId::of(&record(json!({"_id": {"$oid": "abc"}})), "_id");
        let b = RecordId::of(&record(json!({"_id": {"$oid": "abc"}})), "_id");
        let mut seen = std::collections::HashSet::new();
        assert!(seen.insert(a));
        assert!(!seen.insert(b));
    }

    #[test]
    fn test_custom_id_field() {
        let id = RecordId::of(&record(json!({"_id": 1, "uuid": "u-1"})), "uuid");
        assert_eq!(id.to_json(), json!("u-1"));
    }
}
