//! Book error types for lookups and snapshot construction.

use cashview_shared::AppError;
use cashview_shared::types::{AccountGuid, CommodityGuid, PriceGuid, SplitGuid, TransactionGuid};
use thiserror::Error;

/// Errors that can occur while building or querying a book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    // ========== Lookup Errors ==========
    /// No account has this full name.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// No account has this GUID.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountGuid),

    /// No commodity has this GUID.
    #[error("Unknown commodity: {0}")]
    UnknownCommodity(CommodityGuid),

    // ========== Construction Errors ==========
    /// The root GUID is missing or names an account with a parent.
    #[error("Invalid root account: {0}")]
    InvalidRoot(AccountGuid),

    /// Two rows of the same table share a GUID.
    #[error("Duplicate {table} GUID: {guid}")]
    DuplicateGuid {
        /// Table name.
        table: &'static str,
        /// The repeated GUID.
        guid: String,
    },

    /// Account references a commodity that does not exist.
    #[error("Account {account} references unknown commodity {commodity}")]
    DanglingCommodity {
        /// The account.
        account: AccountGuid,
        /// The missing commodity.
        commodity: CommodityGuid,
    },

    /// Account references a parent that does not exist.
    #[error("Account {account} references unknown parent {parent}")]
    DanglingParent {
        /// The account.
        account: AccountGuid,
        /// The missing parent.
        parent: AccountGuid,
    },

    /// Parent links loop back on themselves.
    #[error("Account {0} is its own ancestor")]
    Cycle(AccountGuid),

    /// Split posted to an account that does not exist.
    #[error("Split {split} references unknown account {account}")]
    DanglingSplitAccount {
        /// The split.
        split: SplitGuid,
        /// The missing account.
        account: AccountGuid,
    },

    /// Split belongs to a transaction that does not exist.
    #[error("Split {split} references unknown transaction {transaction}")]
    DanglingSplitTransaction {
        /// The split.
        split: SplitGuid,
        /// The missing transaction.
        transaction: TransactionGuid,
    },

    /// Price refers to a commodity that does not exist.
    #[error("Price {price} references unknown commodity {commodity}")]
    DanglingPrice {
        /// The price.
        price: PriceGuid,
        /// The missing commodity or currency.
        commodity: CommodityGuid,
    },
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::AccountNotFound(_)
            | BookError::UnknownAccount(_)
            | BookError::UnknownCommodity(_) => Self::NotFound(err.to_string()),
            _ => Self::Database(format!("Invalid book: {err}")),
        }
    }
}
