//! The `CandidateStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `ballot-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend,
//! so tests can hand the router an in-memory or failing store.

use std::future::Future;

use crate::{
  candidate::{CandidateRow, NewCandidate},
  party::Party,
};

/// Abstraction over the database gateway.
///
/// Each method issues exactly one statement. Write methods report the
/// affected-row count rather than treating "no such row" as an error; callers
/// decide how to present a zero count.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CandidateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Candidates ────────────────────────────────────────────────────────

  /// Every candidate, left-joined with its party name, ordered by id.
  fn list_candidates(
    &self,
  ) -> impl Future<Output = Result<Vec<CandidateRow>, Self::Error>> + Send + '_;

  /// A single candidate with its party name. `None` if the id is unknown.
  fn get_candidate(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CandidateRow>, Self::Error>> + Send + '_;

  /// Insert a candidate with no party and return the generated id.
  fn add_candidate(
    &self,
    input: NewCandidate,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Set (or clear, with `None`) a candidate's party. Returns rows changed.
  fn set_party(
    &self,
    id: i64,
    party_id: Option<i64>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Delete a candidate by id. Returns rows changed.
  fn delete_candidate(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Parties (read-only) ───────────────────────────────────────────────

  fn list_parties(
    &self,
  ) -> impl Future<Output = Result<Vec<Party>, Self::Error>> + Send + '_;

  fn get_party(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Party>, Self::Error>> + Send + '_;
}
