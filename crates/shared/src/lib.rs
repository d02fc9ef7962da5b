//! Shared types, errors, and configuration for Cashview.
//!
//! This crate provides common types used across all other crates:
//! - Typed GUIDs for type-safe references to GnuCash rows
//! - Pagination types for ledger pages
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
