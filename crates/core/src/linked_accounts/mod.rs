//! Linked accounts - external bank accounts attached to an owner.

mod linked_accounts_model;
mod linked_accounts_service;
mod linked_accounts_traits;

pub use linked_accounts_model::{LinkedAccount, NewLinkedAccount};
pub use linked_accounts_service::LinkedAccountService;
pub use linked_accounts_traits::{LinkedAccountRepositoryTrait, LinkedAccountServiceTrait};
