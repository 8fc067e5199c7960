//! Error types for `ballot-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A field was present but held a value of the wrong shape.
  #[error("{field} must be {expected}")]
  InvalidField {
    field:    &'static str,
    expected: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
