//! Repository abstractions for data access.
//!
//! Repositories hide the SQL of the GnuCash schema from the rest of the
//! application and hand out core domain types.

pub mod book;

pub use book::BookRepository;
