use async_trait::async_trait;

use super::linked_accounts_model::{LinkedAccount, NewLinkedAccount};
use crate::errors::Result;
use crate::identity::OwnerScope;

#[async_trait]
pub trait LinkedAccountRepositoryTrait: Send + Sync {
    fn list(&self, owner_id: &str) -> Result<Vec<LinkedAccount>>;

    /// Inserts the account. Uniqueness of `(owner_id, external_account_id)` is
    /// enforced by the store; a duplicate is reported as a conflict.
    async fn insert(&self, owner_id: &str, account: NewLinkedAccount) -> Result<LinkedAccount>;

    async fn delete(&self, linked_account_id: &str, owner_id: &str) -> Result<()>;
}

#[async_trait]
pub trait LinkedAccountServiceTrait: Send + Sync {
    fn list_linked_accounts(&self, owner: &OwnerScope) -> Result<Vec<LinkedAccount>>;

    async fn link_account(
        &self,
        owner: &OwnerScope,
        account: NewLinkedAccount,
    ) -> Result<LinkedAccount>;

    async fn unlink_account(&self, linked_account_id: &str, owner: &OwnerScope) -> Result<()>;
}
