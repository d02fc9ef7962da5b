//! Ledger error types.

use cashview_shared::AppError;
use cashview_shared::types::PageError;
use thiserror::Error;

use crate::book::BookError;

/// Errors that can occur while paging an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The account could not be found.
    #[error(transparent)]
    Book(#[from] BookError),

    /// The page request does not fit the ledger.
    #[error(transparent)]
    Page(#[from] PageError),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Book(e) => e.into(),
            LedgerError::Page(e) => e.into(),
        }
    }
}
