//! SQLite storage implementation for savings wallets.

mod model;
mod repository;


pub use model::{NewWalletDB, WalletChangesetDB, WalletDB};
pub(crate) use model::parse_decimal;
pub(crate) use repository::find_owned;
pub use repository::WalletRepository;
