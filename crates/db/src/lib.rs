//! GnuCash SQLite loader.
//!
//! This crate provides:
//! - A read-only `sqlx` connection to a GnuCash SQLite file
//! - `BookRepository`, which reads the book tables into a
//!   [`Book`](cashview_core::book::Book) snapshot

pub mod error;
pub mod repositories;
mod rows;

pub use error::LoadError;
pub use repositories::BookRepository;

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 4;

/// Opens a connection pool on the GnuCash file at `path`.
///
/// The file is never created; a missing file is an error.
///
/// # Errors
///
/// Returns an error if the file cannot be opened as an SQLite database.
pub async fn connect(path: &Path, read_only: bool) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(read_only)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}
