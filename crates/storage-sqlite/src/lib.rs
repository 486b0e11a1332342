//! SQLite storage implementation for Lockbox.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `lockbox-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for wallets, deductions and linked accounts
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!  storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Every write is funnelled through the
//! single writer actor (`WriteHandle`), which runs each job in an immediate
//! transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod deductions;
pub mod linked_accounts;
pub mod wallets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use deductions::DeductionRepository;
pub use linked_accounts::LinkedAccountRepository;
pub use wallets::WalletRepository;

// Re-export from lockbox-core for convenience
pub use lockbox_core::errors::{DatabaseError, Error, Result};


#[cfg(test)]
pub(crate) mod test_utils;
