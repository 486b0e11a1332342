//! Lockbox Core - Domain entities, services, and traits.
//!
//! This crate contains the savings wallet engine: lifecycle rules, the
//! penalty and progress calculator, and the deduction aggregate. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod constants;
pub mod deductions;
pub mod errors;
pub mod identity;
pub mod linked_accounts;
pub mod utils;
pub mod wallets;

pub use identity::OwnerScope;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
