//! The `{message, data, changes, id}` success envelope.

use serde::Serialize;

/// Success body shared by every route. Absent fields are omitted, not `null`.
#[derive(Debug, Serialize)]
pub struct Reply<T> {
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub changes: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id:      Option<i64>,
}

impl<T> Reply<T> {
  /// `{"message": "success", "data": ...}`; `data` is dropped when `None`.
  pub fn success(data: Option<T>) -> Self {
    Self { message: "success", data, changes: None, id: None }
  }

  pub fn with_changes(mut self, changes: usize) -> Self {
    self.changes = Some(changes);
    self
  }

  pub fn with_id(mut self, id: i64) -> Self {
    self.id = Some(id);
    self
  }
}

impl Reply<()> {
  /// A bare `{"message": ...}` body.
  pub fn message(message: &'static str) -> Self {
    Self { message, data: None, changes: None, id: None }
  }
}
