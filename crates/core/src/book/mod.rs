//! In-memory GnuCash book.
//!
//! This module holds the read-side model of a book:
//! - Record types (accounts, transactions, splits)
//! - Validating snapshot construction
//! - Account tree navigation and lookup by full name
//! - The balance primitives the safe balance falls back from

pub mod builder;
pub mod error;
pub mod node;
pub mod snapshot;
pub mod types;


pub use builder::BookBuilder;
pub use error::BookError;
pub use node::AccountNode;
pub use snapshot::Book;
pub use types::{Account, AccountType, Split, Transaction};
