//! Core book logic for Cashview.
//!
//! This crate contains pure book logic with ZERO web or database dependencies.
//! A GnuCash book is loaded elsewhere and handed over as an immutable
//! [`book::Book`]; everything here reads from it.
//!
//! # Modules
//!
//! - `commodity` - Commodities, prices and currency conversion
//! - `book` - Account tree snapshot, lookup and balance primitives
//! - `balance` - Safe balances that tolerate missing price data
//! - `ledger` - Paged account ledgers with running balances

pub mod balance;
pub mod book;
pub mod commodity;
pub mod ledger;
