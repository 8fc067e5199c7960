//! Error type for `ballot-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A statement failed inside SQLite. Displays the driver's own message,
  /// e.g. `FOREIGN KEY constraint failed`.
  #[error(transparent)]
  Database(#[from] rusqlite::Error),

  /// The connection thread itself failed or has shut down.
  #[error(transparent)]
  Connection(tokio_rusqlite::Error),

  #[error("failed to read seed script {path}: {source}")]
  Seed {
    path:   std::path::PathBuf,
    #[source]
    source: std::io::Error,
  },
}

// `tokio_rusqlite` wraps driver errors; unwrap them so only SQLite's text
// reaches callers.
impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(e) => Self::Database(e),
      other => Self::Connection(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
