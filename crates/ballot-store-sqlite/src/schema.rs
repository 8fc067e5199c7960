//! SQL schema for the Ballot SQLite store.
//!
//! Executed once at connection startup. There is no migration path; the
//! statements only create what is missing.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS parties (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  VARCHAR(50) NOT NULL
);

CREATE TABLE IF NOT EXISTS candidates (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name         VARCHAR(30) NOT NULL,
    last_name          VARCHAR(30) NOT NULL,
    party_id           INTEGER REFERENCES parties(id) ON DELETE SET NULL,
    industry_connected BOOLEAN NOT NULL
);
";

/// Columns selected by every candidate read, in [`decode`](crate::decode) order.
pub const CANDIDATE_SELECT: &str = "
SELECT candidates.id,
       candidates.first_name,
       candidates.last_name,
       candidates.industry_connected,
       candidates.party_id,
       parties.name AS party_name
  FROM candidates
  LEFT JOIN parties ON candidates.party_id = parties.id";
