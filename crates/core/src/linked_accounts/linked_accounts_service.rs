use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::linked_accounts_model::{LinkedAccount, NewLinkedAccount};
use super::linked_accounts_traits::{LinkedAccountRepositoryTrait, LinkedAccountServiceTrait};
use crate::errors::Result;
use crate::identity::OwnerScope;

pub struct LinkedAccountService {
    repository: Arc<dyn LinkedAccountRepositoryTrait>,
}

impl LinkedAccountService {
    pub fn new(repository: Arc<dyn LinkedAccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LinkedAccountServiceTrait for LinkedAccountService {
    fn list_linked_accounts(&self, owner: &OwnerScope) -> Result<Vec<LinkedAccount>> {
        self.repository.list(owner.as_str())
    }

    /// No existence pre-check: the insert itself is the uniqueness test.
    async fn link_account(
        &self,
        owner: &OwnerScope,
        account: NewLinkedAccount,
    ) -> Result<LinkedAccount> {
        let account = account.normalized()?;
        let linked = self.repository.insert(owner.as_str(), account).await?;
        info!(
            "Linked {} account {} for owner {}",
            linked.provider, linked.id, owner
        );
        Ok(linked)
    }

    async fn unlink_account(&self, linked_account_id: &str, owner: &OwnerScope) -> Result<()> {
        self.repository.delete(linked_account_id, owner.as_str()).await
    }
}
