//! [`SqliteStore`] — the SQLite implementation of [`CandidateStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use ballot_core::{
  candidate::{CandidateRow, NewCandidate},
  party::Party,
  store::CandidateStore,
};

use crate::{
  Error, Result, decode,
  schema::{CANDIDATE_SELECT, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A candidate store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// clone shares the same connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self.run_script(SCHEMA).await
  }

  /// Execute a batch of SQL statements, e.g. party seed rows.
  pub async fn run_script(&self, sql: impl Into<String>) -> Result<()> {
    let sql = sql.into();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read a SQL file from disk and execute it with [`run_script`](Self::run_script).
  pub async fn run_script_file(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let sql = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| Error::Seed { path: path.to_path_buf(), source })?;
    self.run_script(sql).await
  }

  /// Insert a party and return its id. Parties have no HTTP write path, so
  /// callers that need one without a SQL script (test fixtures) use this.
  pub async fn add_party(&self, name: impl Into<String>) -> Result<i64> {
    let name = name.into();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO parties (name) VALUES (?1)", rusqlite::params![name])?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Number of rows in `candidates`.
  pub async fn count_candidates(&self) -> Result<i64> {
    let n = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM candidates", [], |r| r.get::<_, i64>(0))?)
      })
      .await?;
    Ok(n)
  }
}

// ─── CandidateStore impl ─────────────────────────────────────────────────────

impl CandidateStore for SqliteStore {
  type Error = Error;

  // ── Candidates ────────────────────────────────────────────────────────────

  async fn list_candidates(&self) -> Result<Vec<CandidateRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("{CANDIDATE_SELECT} ORDER BY candidates.id"))?;
        let rows = stmt
          .query_map([], decode::candidate_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn get_candidate(&self, id: i64) -> Result<Option<CandidateRow>> {
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{CANDIDATE_SELECT} WHERE candidates.id = ?1"),
              rusqlite::params![id],
              decode::candidate_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn add_candidate(&self, input: NewCandidate) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO candidates (first_name, last_name, industry_connected)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![
            input.first_name,
            input.last_name,
            input.industry_connected,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn set_party(&self, id: i64, party_id: Option<i64>) -> Result<usize> {
    let changes = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE candidates SET party_id = ?1 WHERE id = ?2",
          rusqlite::params![party_id, id],
        )?)
      })
      .await?;
    Ok(changes)
  }

  async fn delete_candidate(&self, id: i64) -> Result<usize> {
    let changes = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM candidates WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(changes)
  }

  // ── Parties ───────────────────────────────────────────────────────────────

  async fn list_parties(&self) -> Result<Vec<Party>> {
    let parties = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM parties ORDER BY id")?;
        let rows = stmt
          .query_map([], decode::party)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(parties)
  }

  async fn get_party(&self, id: i64) -> Result<Option<Party>> {
    let party = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name FROM parties WHERE id = ?1",
              rusqlite::params![id],
              decode::party,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(party)
  }
}
