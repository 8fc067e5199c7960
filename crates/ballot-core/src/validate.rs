//! Required-field checks run before any write reaches the store.

use serde_json::{Map, Value};

/// A request body as submitted, before any typing is applied.
pub type Record = Map<String, Value>;

/// Return one `"<field> is required"` message for every entry in `required`
/// that is missing from `record` or holds an empty string.
///
/// An empty vector means the record passes. Only presence is checked; value
/// types are left to [`NewCandidate::from_record`](crate::candidate::NewCandidate::from_record).
pub fn validate(record: &Record, required: &[&str]) -> Vec<String> {
  required
    .iter()
    .filter(|field| match record.get(**field) {
      None => true,
      Some(Value::String(s)) => s.is_empty(),
      Some(_) => false,
    })
    .map(|field| format!("{field} is required"))
    .collect()
}
