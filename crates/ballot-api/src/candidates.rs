//! Handlers for `/candidates` and `/candidate` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/candidates`     | All candidates with `party_name` |
//! | `GET`    | `/candidate/{id}` | Single candidate; `data` omitted if absent |
//! | `POST`   | `/candidate`      | Body: `first_name`, `last_name`, `industry_connected` |
//! | `PUT`    | `/candidate/{id}` | Body: `party_id` (`null` clears it) |
//! | `DELETE` | `/candidate/{id}` | |

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
  response::{IntoResponse, Response},
};
use ballot_core::{
  candidate::{CREATE_FIELDS, NewCandidate, UPDATE_PARTY_FIELDS, party_id_from_record},
  store::CandidateStore,
  validate,
};

use crate::{AppState, body::Submission, error::ApiError, reply::Reply};

const NOT_FOUND: &str = "Candidate not found";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /candidates`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let rows = state.store.list_candidates().await.map_err(ApiError::store)?;
  Ok(Json(Reply::success(Some(rows))).into_response())
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /candidate/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let Path(id) = id?;
  let row = state
    .store
    .get_candidate(id)
    .await
    .map_err(|e| state.policy.statement_failure(e))?;
  state.policy.one_row(row, NOT_FOUND)
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /candidate` — echoes the submitted body as `data` and adds the
/// generated `id`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Submission(body): Submission,
) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let errors = validate(&body, CREATE_FIELDS);
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }
  let input = NewCandidate::from_record(&body)?;

  let id = state
    .store
    .add_candidate(input)
    .await
    .map_err(|e| state.policy.statement_failure(e))?;
  tracing::debug!(id, "candidate created");

  Ok((state.policy.created(), Json(Reply::success(Some(body)).with_id(id))).into_response())
}

// ─── Update party ─────────────────────────────────────────────────────────────

/// `PUT /candidate/{id}` — body: `{"party_id": 1}`.
pub async fn update_party<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
  Submission(body): Submission,
) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let Path(id) = id?;
  let errors = validate(&body, UPDATE_PARTY_FIELDS);
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }
  let party_id = party_id_from_record(&body)?;

  let changes = state
    .store
    .set_party(id, party_id)
    .await
    .map_err(|e| state.policy.statement_failure(e))?;
  if changes == 0 {
    return state.policy.nothing_changed(NOT_FOUND);
  }

  Ok(Json(Reply::success(Some(body)).with_changes(changes)).into_response())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /candidate/{id}`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError>
where
  S: CandidateStore,
{
  let Path(id) = id?;
  let changes = state
    .store
    .delete_candidate(id)
    .await
    .map_err(|e| state.policy.statement_failure(e))?;
  if changes == 0 {
    return state.policy.nothing_changed(NOT_FOUND);
  }

  Ok(
    Json(Reply::<()>::message("deleted").with_changes(changes).with_id(id))
      .into_response(),
  )
}
