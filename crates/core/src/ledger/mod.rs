//! Account ledger pages.
//!
//! - `LedgerEntry` - one split with its transaction and running balance
//! - `account_ledger` - a page of an account's splits, newest first
//! - `LedgerError` - unknown accounts and invalid pages

pub mod entry;
pub mod error;
pub mod page;


pub use entry::LedgerEntry;
pub use error::LedgerError;
pub use page::account_ledger;
