//! JSON REST API for Ballot.
//!
//! Exposes an axum [`Router`] backed by any [`ballot_core::store::CandidateStore`].
//! Transport concerns, the 404 fallback, and request tracing are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", ballot_api::api_router(store.clone(), StatusPolicy::Compat))
//! ```

pub mod body;
pub mod candidates;
pub mod error;
pub mod parties;
pub mod policy;
pub mod reply;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use ballot_core::store::CandidateStore;

pub use error::ApiError;
pub use policy::StatusPolicy;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub policy: StatusPolicy,
}

// Manual impl: cloning the state never requires `S: Clone`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      policy: self.policy,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: StatusPolicy) -> Router<()>
where
  S: CandidateStore + 'static,
{
  Router::new()
    // Candidates
    .route("/candidates", get(candidates::list::<S>))
    .route("/candidate", post(candidates::create::<S>))
    .route(
      "/candidate/{id}",
      get(candidates::get_one::<S>)
        .put(candidates::update_party::<S>)
        .delete(candidates::delete_one::<S>),
    )
    // Parties
    .route("/parties", get(parties::list::<S>))
    .route("/party/{id}", get(parties::get_one::<S>))
    .with_state(AppState { store, policy })
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use ballot_core::{
    candidate::{CandidateRow, NewCandidate},
    party::Party,
  };
  use ballot_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn send(
    app:          Router,
    method:       &str,
    uri:          &str,
    content_type: Option<&str>,
    body:         &str,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let req  = builder.body(Body::from(body.to_string())).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value  = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, method, uri, Some("application/json"), &body.to_string()).await
  }

  fn compat(store: &Arc<SqliteStore>) -> Router {
    api_router(store.clone(), StatusPolicy::Compat)
  }

  fn strict(store: &Arc<SqliteStore>) -> Router {
    api_router(store.clone(), StatusPolicy::Strict)
  }

  async fn seed_candidate(store: &SqliteStore) -> i64 {
    store
      .add_candidate(NewCandidate {
        first_name:         "Ronald".into(),
        last_name:          "Firbank".into(),
        industry_connected: true,
      })
      .await
      .unwrap()
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_echoes_body_and_stores_row() {
    let store = make_store().await;
    let body  = json!({ "first_name": "Jane", "last_name": "Doe", "industry_connected": true });

    let (status, resp) = send_json(compat(&store), "POST", "/candidate", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "success");
    assert_eq!(resp["data"], body);

    let id  = resp["id"].as_i64().unwrap();
    let row = store.get_candidate(id).await.unwrap().unwrap();
    assert_eq!(row.candidate.first_name, "Jane");
    assert_eq!(row.candidate.party_id, None);
  }

  #[tokio::test]
  async fn create_missing_last_name_is_rejected_without_insert() {
    let store = make_store().await;
    let body  = json!({ "first_name": "Jane", "industry_connected": true });

    let (status, resp) = send_json(compat(&store), "POST", "/candidate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], json!(["last_name is required"]));
    assert_eq!(store.count_candidates().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn create_with_empty_strings_lists_every_field() {
    let store = make_store().await;
    let body  = json!({ "first_name": "", "last_name": "", "industry_connected": "" });

    let (status, resp) = send_json(compat(&store), "POST", "/candidate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"].as_array().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn create_with_bad_flag_is_rejected() {
    let store = make_store().await;
    let body  = json!({ "first_name": "A", "last_name": "B", "industry_connected": "sometimes" });

    let (status, resp) = send_json(compat(&store), "POST", "/candidate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], json!(["industry_connected must be a boolean"]));
    assert_eq!(store.count_candidates().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn create_accepts_urlencoded_form() {
    let store = make_store().await;
    let (status, resp) = send(
      compat(&store),
      "POST",
      "/candidate",
      Some("application/x-www-form-urlencoded"),
      "first_name=Jane&last_name=Doe&industry_connected=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["industry_connected"], "1");

    let row = store
      .get_candidate(resp["id"].as_i64().unwrap())
      .await
      .unwrap()
      .unwrap();
    assert!(row.candidate.industry_connected);
  }

  #[tokio::test]
  async fn create_without_content_type_reports_all_fields() {
    let store = make_store().await;
    let (status, resp) = send(compat(&store), "POST", "/candidate", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      resp["error"],
      json!(["first_name is required", "last_name is required", "industry_connected is required"])
    );
  }

  #[tokio::test]
  async fn create_with_malformed_json_is_400() {
    let store = make_store().await;
    let (status, resp) =
      send(compat(&store), "POST", "/candidate", Some("application/json"), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"].is_string());
  }

  #[tokio::test]
  async fn strict_create_is_201() {
    let store = make_store().await;
    let body  = json!({ "first_name": "Jane", "last_name": "Doe", "industry_connected": false });
    let (status, _) = send_json(strict(&store), "POST", "/candidate", body).await;
    assert_eq!(status, StatusCode::CREATED);
  }

  // ── List / get ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_includes_candidates_without_party() {
    let store = make_store().await;
    let party = store.add_party("Jacobin Party").await.unwrap();
    let a     = seed_candidate(&store).await;
    let b     = seed_candidate(&store).await;
    store.set_party(a, Some(party)).await.unwrap();

    let (status, resp) = send(compat(&store), "GET", "/candidates", None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "success");

    let rows: Vec<CandidateRow> = serde_json::from_value(resp["data"].clone()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].party_name.as_deref(), Some("Jacobin Party"));
    assert_eq!(rows[1].candidate.id, b);
    assert_eq!(rows[1].party_name, None);
    assert!(resp["data"][1]["party_name"].is_null());
  }

  #[tokio::test]
  async fn list_empty_still_has_data_array() {
    let store = make_store().await;
    let (status, resp) = send(compat(&store), "GET", "/candidates", None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"], json!([]));
  }

  #[tokio::test]
  async fn get_one_returns_row() {
    let store = make_store().await;
    let id    = seed_candidate(&store).await;

    let (status, resp) = send(compat(&store), "GET", &format!("/candidate/{id}"), None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["id"], id);
    assert_eq!(resp["data"]["last_name"], "Firbank");
  }

  #[tokio::test]
  async fn get_one_missing_is_success_without_data() {
    let store = make_store().await;
    let (status, resp) = send(compat(&store), "GET", "/candidate/77", None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "message": "success" }));
  }

  #[tokio::test]
  async fn strict_get_one_missing_is_404() {
    let store = make_store().await;
    let (status, resp) = send(strict(&store), "GET", "/candidate/77", None, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["error"], "Candidate not found");
  }

  #[tokio::test]
  async fn non_numeric_id_is_400() {
    let store = make_store().await;
    let (status, resp) = send(compat(&store), "GET", "/candidate/abc", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"].is_string());
  }

  // ── Update party ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_party_then_get_shows_party_name() {
    let store = make_store().await;
    let party = store.add_party("Wild Rose Party").await.unwrap();
    let id    = seed_candidate(&store).await;
    let body  = json!({ "party_id": party });

    let (status, resp) =
      send_json(compat(&store), "PUT", &format!("/candidate/{id}"), body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "success");
    assert_eq!(resp["data"], body);
    assert_eq!(resp["changes"], 1);

    let (_, resp) = send(compat(&store), "GET", &format!("/candidate/{id}"), None, "").await;
    assert_eq!(resp["data"]["party_name"], "Wild Rose Party");
  }

  #[tokio::test]
  async fn update_party_accepts_urlencoded_form() {
    let store = make_store().await;
    let party = store.add_party("Wild Rose Party").await.unwrap();
    let id    = seed_candidate(&store).await;

    let (status, resp) = send(
      compat(&store),
      "PUT",
      &format!("/candidate/{id}"),
      Some("application/x-www-form-urlencoded"),
      &format!("party_id={party}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"], json!({ "party_id": party.to_string() }));
    assert_eq!(resp["changes"], 1);

    let row = store.get_candidate(id).await.unwrap().unwrap();
    assert_eq!(row.candidate.party_id, Some(party));
  }

  #[tokio::test]
  async fn update_unknown_candidate_reports_not_found_as_success() {
    let store = make_store().await;
    let party = store.add_party("Wild Rose Party").await.unwrap();
    let id    = seed_candidate(&store).await;

    let (status, resp) =
      send_json(compat(&store), "PUT", "/candidate/999", json!({ "party_id": party })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "message": "Candidate not found" }));

    let row = store.get_candidate(id).await.unwrap().unwrap();
    assert_eq!(row.candidate.party_id, None);
  }

  #[tokio::test]
  async fn update_without_party_id_is_validation_error() {
    let store = make_store().await;
    let id    = seed_candidate(&store).await;
    let (status, resp) =
      send_json(compat(&store), "PUT", &format!("/candidate/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], json!(["party_id is required"]));
  }

  #[tokio::test]
  async fn update_to_unknown_party_surfaces_store_error_as_400() {
    let store = make_store().await;
    let id    = seed_candidate(&store).await;
    let (status, resp) =
      send_json(compat(&store), "PUT", &format!("/candidate/{id}"), json!({ "party_id": 404 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp, json!({ "error": "FOREIGN KEY constraint failed" }));
  }

  #[tokio::test]
  async fn strict_update_unknown_candidate_is_404() {
    let store = make_store().await;
    let (status, _) =
      send_json(strict(&store), "PUT", "/candidate/5", json!({ "party_id": null })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_delete_again() {
    let store = make_store().await;
    let id    = seed_candidate(&store).await;
    seed_candidate(&store).await;

    let (status, resp) = send(compat(&store), "DELETE", &format!("/candidate/{id}"), None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "message": "deleted", "changes": 1, "id": id }));
    assert_eq!(store.count_candidates().await.unwrap(), 1);

    let (status, resp) = send(compat(&store), "DELETE", &format!("/candidate/{id}"), None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "message": "Candidate not found" }));
  }

  // ── Parties ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn parties_are_listed_and_fetched() {
    let store = make_store().await;
    let id    = store.add_party("Shamrock Party").await.unwrap();

    let (status, resp) = send(compat(&store), "GET", "/parties", None, "").await;
    assert_eq!(status, StatusCode::OK);
    let parties: Vec<Party> = serde_json::from_value(resp["data"].clone()).unwrap();
    assert_eq!(parties, vec![Party { id, name: "Shamrock Party".into() }]);

    let (status, resp) = send(compat(&store), "GET", &format!("/party/{id}"), None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["name"], "Shamrock Party");
  }

  // ── Failing store ───────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("connection lost")]
  struct Down;

  struct DownStore;

  impl CandidateStore for DownStore {
    type Error = Down;

    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, Down> { Err(Down) }

    async fn get_candidate(&self, _: i64) -> Result<Option<CandidateRow>, Down> { Err(Down) }

    async fn add_candidate(&self, _: NewCandidate) -> Result<i64, Down> { Err(Down) }

    async fn set_party(&self, _: i64, _: Option<i64>) -> Result<usize, Down> { Err(Down) }

    async fn delete_candidate(&self, _: i64) -> Result<usize, Down> { Err(Down) }

    async fn list_parties(&self) -> Result<Vec<Party>, Down> { Err(Down) }

    async fn get_party(&self, _: i64) -> Result<Option<Party>, Down> { Err(Down) }
  }

  fn down(policy: StatusPolicy) -> Router {
    api_router(Arc::new(DownStore), policy)
  }

  #[tokio::test]
  async fn compat_list_failure_is_500_and_others_are_400() {
    let (status, resp) = send(down(StatusPolicy::Compat), "GET", "/candidates", None, "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp, json!({ "error": "connection lost" }));

    let (status, resp) = send(down(StatusPolicy::Compat), "GET", "/candidate/1", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp, json!({ "error": "connection lost" }));

    let (status, _) = send(down(StatusPolicy::Compat), "DELETE", "/candidate/1", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "first_name": "A", "last_name": "B", "industry_connected": true });
    let (status, _) = send_json(down(StatusPolicy::Compat), "POST", "/candidate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn strict_store_failures_are_500() {
    for (method, uri) in [("GET", "/candidate/1"), ("DELETE", "/candidate/1"), ("GET", "/party/1")] {
      let (status, resp) = send(down(StatusPolicy::Strict), method, uri, None, "").await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(resp["error"], "connection lost");
    }
  }

  #[tokio::test]
  async fn validation_runs_before_the_store() {
    let (status, resp) =
      send_json(down(StatusPolicy::Compat), "PUT", "/candidate/1", json!({ "party_id": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], json!(["party_id is required"]));
  }
}
