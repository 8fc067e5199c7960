//! Candidate types and the conversion from a submitted [`Record`].
//!
//! A candidate is created without a party. `party_id` is the only field that
//! changes afterwards; everything else is fixed until the row is deleted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Record, Result};

/// Fields required by `POST /candidate`, in the order errors are reported.
pub const CREATE_FIELDS: &[&str] = &["first_name", "last_name", "industry_connected"];

/// Fields required by `PUT /candidate/{id}`.
pub const UPDATE_PARTY_FIELDS: &[&str] = &["party_id"];

// ─── Stored shapes ───────────────────────────────────────────────────────────

/// A row of the `candidates` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  pub id:                 i64,
  pub first_name:         String,
  pub last_name:          String,
  pub industry_connected: bool,
  pub party_id:           Option<i64>,
}

/// A candidate left-joined with its party's name.
///
/// `party_name` is `None` when the candidate has no party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
  #[serde(flatten)]
  pub candidate:  Candidate,
  pub party_name: Option<String>,
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// The typed input to an insert. `party_id` is always left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
  pub first_name:         String,
  pub last_name:          String,
  pub industry_connected: bool,
}

impl NewCandidate {
  /// Build from a record that has already passed [`validate`](crate::validate)
  /// against [`CREATE_FIELDS`].
  ///
  /// `industry_connected` accepts a bool, `0`/`1`, or their string forms so
  /// url-encoded bodies work the same as JSON ones.
  pub fn from_record(record: &Record) -> Result<Self> {
    Ok(Self {
      first_name:         string_field(record, "first_name")?,
      last_name:          string_field(record, "last_name")?,
      industry_connected: bool_field(record, "industry_connected")?,
    })
  }
}

/// Read `party_id` from a validated update record.
///
/// `null` clears the assignment; integers and numeric strings set it.
pub fn party_id_from_record(record: &Record) -> Result<Option<i64>> {
  const FIELD: &str = "party_id";
  let invalid = Error::InvalidField { field: FIELD, expected: "an integer or null" };

  match record.get(FIELD) {
    Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => n.as_i64().map(Some).ok_or(invalid),
    Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid),
    _ => Err(invalid),
  }
}

fn string_field(record: &Record, field: &'static str) -> Result<String> {
  match record.get(field) {
    Some(Value::String(s)) => Ok(s.clone()),
    _ => Err(Error::InvalidField { field, expected: "a string" }),
  }
}

fn bool_field(record: &Record, field: &'static str) -> Result<bool> {
  let invalid = Error::InvalidField { field, expected: "a boolean" };
  match record.get(field) {
    Some(Value::Bool(b)) => Ok(*b),
    Some(Value::Number(n)) => match n.as_i64() {
      Some(0) => Ok(false),
      Some(1) => Ok(true),
      _ => Err(invalid),
    },
    Some(Value::String(s)) => match s.trim() {
      "true" | "1" => Ok(true),
      "false" | "0" => Ok(false),
      _ => Err(invalid),
    },
    _ => Err(invalid),
  }
}
