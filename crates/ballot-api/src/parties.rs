//! Read-only handlers for `/parties` and `/party/{id}`.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
  response::{IntoResponse, Response},
};
use ballot_core::store::CandidateStore;

use crate::{AppState, error::ApiError, reply::Reply};

/// `GET /parties`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let parties = state.store.list_parties().await.map_err(ApiError::store)?;
  Ok(Json(Reply::success(Some(parties))).into_response())
}

/// `GET /party/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let Path(id) = id?;
  let party = state
    .store
    .get_party(id)
    .await
    .map_err(|e| state.policy.statement_failure(e))?;
  state.policy.one_row(party, "Party not found")
}
