//! HTTP server assembly for Ballot.
//!
//! Loads [`ServerConfig`] and wraps the API router with the `/api` prefix,
//! request tracing, and an empty-bodied 404 for everything else.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, http::StatusCode};
use ballot_api::StatusPolicy;
use ballot_core::store::CandidateStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered lowest to highest: built-in defaults, the TOML file, `BALLOT_*`
/// environment variables, then a bare `PORT`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  pub status_policy: StatusPolicy,
}

impl ServerConfig {
  /// Load from `file` (optional on disk) and the environment.
  ///
  /// `vars` replaces the process environment when given, which keeps tests
  /// away from global state.
  pub fn load(
    file: &Path,
    vars: Option<HashMap<String, String>>,
  ) -> Result<Self, config::ConfigError> {
    let port = match &vars {
      Some(v) => v.get("PORT").cloned(),
      None => std::env::var("PORT").ok(),
    };

    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3001_i64)?
      .set_default("database_path", "ballot.db")?
      .set_default("status_policy", "compat")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("BALLOT").source(vars))
      .set_override_option("port", port)?
      .build()?
      .try_deserialize()
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: `/api` routes, tracing, and a bare 404 fallback.
pub fn app<S>(store: Arc<S>, policy: StatusPolicy) -> Router
where
  S: CandidateStore + 'static,
{
  Router::new()
    .nest("/api", ballot_api::api_router(store, policy))
    .fallback(|| async { StatusCode::NOT_FOUND })
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
