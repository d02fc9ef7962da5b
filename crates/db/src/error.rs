//! Errors raised while loading a book from SQLite.

use cashview_core::book::BookError;
use cashview_shared::AppError;
use thiserror::Error;

/// Error types for book loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The query itself failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The `books` table is empty.
    #[error("The database contains no book")]
    MissingBook,

    /// A row could not be turned into a book record.
    #[error("Invalid {table} row {guid}: {reason}")]
    InvalidRow {
        /// Table the row came from.
        table: &'static str,
        /// GUID of the row, as stored.
        guid: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The rows do not form a valid book.
    #[error(transparent)]
    Book(#[from] BookError),
}

impl LoadError {
    pub(crate) fn invalid_row(
        table: &'static str,
        guid: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRow {
            table,
            guid: guid.into(),
            reason: reason.into(),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Book(e) => e.into(),
            other => Self::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_row_message() {
        let err = LoadError::invalid_row("splits", "abc", "zero denominator");
        assert_eq!(err.to_string(), "Invalid splits row abc: zero denominator");
    }

    #[test]
    fn test_load_errors_are_database_errors() {
        let app: AppError = LoadError::MissingBook.into();
        assert_eq!(app.error_code(), "DATABASE_ERROR");
        assert_eq!(app.status_code(), 500);
    }
}
