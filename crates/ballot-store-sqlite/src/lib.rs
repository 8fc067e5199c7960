//! SQLite backend for the Ballot candidate store.
//!
//! Wraps [`tokio_rusqlite`] so every statement runs on the connection's own
//! thread without blocking the async runtime.

mod decode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
