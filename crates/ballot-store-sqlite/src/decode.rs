//! Row decoding from the shared candidate and party SELECTs.

use ballot_core::{
  candidate::{Candidate, CandidateRow},
  party::Party,
};

/// Decode a row produced by [`CANDIDATE_SELECT`](crate::schema::CANDIDATE_SELECT).
pub fn candidate_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CandidateRow> {
  Ok(CandidateRow {
    candidate:  Candidate {
      id:                 row.get(0)?,
      first_name:         row.get(1)?,
      last_name:          row.get(2)?,
      industry_connected: row.get(3)?,
      party_id:           row.get(4)?,
    },
    party_name: row.get(5)?,
  })
}

/// Decode a `SELECT id, name FROM parties` row.
pub fn party(row: &rusqlite::Row<'_>) -> rusqlite::Result<Party> {
  Ok(Party {
    id:   row.get(0)?,
    name: row.get(1)?,
  })
}
