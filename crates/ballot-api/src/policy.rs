//! How store outcomes become HTTP statuses.
//!
//! [`StatusPolicy::Compat`] reproduces the long-standing behaviour clients of
//! this API rely on: a failed list is a 500, every other failed statement is a
//! 400, and a missing candidate is a 200 with a `"Candidate not found"`
//! message. [`StatusPolicy::Strict`] answers 500 for every store failure, 404
//! for every missing row, and 201 for a create.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, reply::Reply};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
  #[default]
  Compat,
  Strict,
}

impl StatusPolicy {
  /// Map a store failure on any route other than a list.
  pub(crate) fn statement_failure<E>(self, e: E) -> ApiError
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match self {
      StatusPolicy::Compat => {
        tracing::warn!(error = %e, "store call rejected");
        ApiError::BadRequest(e.to_string())
      }
      StatusPolicy::Strict => ApiError::store(e),
    }
  }

  /// Answer for a write that touched no rows.
  pub(crate) fn nothing_changed(self, message: &'static str) -> Result<Response, ApiError> {
    match self {
      StatusPolicy::Compat => Ok(Json(Reply::<()>::message(message)).into_response()),
      StatusPolicy::Strict => Err(ApiError::NotFound(message.to_owned())),
    }
  }

  /// Answer for a single-row read. Under `Compat` an absent row is still a
  /// success, just without `data`.
  pub(crate) fn one_row<T: Serialize>(
    self,
    row: Option<T>,
    missing: &'static str,
  ) -> Result<Response, ApiError> {
    match (self, row) {
      (StatusPolicy::Strict, None) => Err(ApiError::NotFound(missing.to_owned())),
      (_, row) => Ok(Json(Reply::success(row)).into_response()),
    }
  }

  pub(crate) fn created(self) -> StatusCode {
    match self {
      StatusPolicy::Compat => StatusCode::OK,
      StatusPolicy::Strict => StatusCode::CREATED,
    }
  }
}
