//! SQLite storage implementation for linked external accounts.

mod model;
mod repository;

pub use model::{LinkedAccountDB, NewLinkedAccountDB};
pub use repository::LinkedAccountRepository;
