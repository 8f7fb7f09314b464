#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! `SQLite` storage for earthquake records.
//!
//! Connection setup ([`db`]) and the query layer ([`queries`]). The schema
//! is applied idempotently whenever a connection is opened, so binaries
//! don't need a separate migration step before first use.

pub mod db;
pub mod queries;

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error creating the database directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
