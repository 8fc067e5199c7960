//! Party — a read-only lookup row referenced by candidates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
  pub id:   i64,
  pub name: String,
}
