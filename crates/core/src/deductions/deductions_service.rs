use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::deductions_model::{
    DeductionPatch, DeductionSummary, NewScheduledDeduction, ScheduledDeduction,
};
use super::deductions_traits::{DeductionRepositoryTrait, DeductionServiceTrait};
use crate::errors::Result;
use crate::identity::OwnerScope;

/// Service for managing scheduled deductions
pub struct DeductionService {
    repository: Arc<dyn DeductionRepositoryTrait>,
}

impl DeductionService {
    pub fn new(repository: Arc<dyn DeductionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl DeductionServiceTrait for DeductionService {
    fn list_deductions(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
    ) -> Result<Vec<ScheduledDeduction>> {
        self.repository.list_for_wallet(wallet_id, owner.as_str())
    }

    fn get_summary(&self, wallet_id: &str, owner: &OwnerScope) -> Result<DeductionSummary> {
        self.repository.aggregate(wallet_id, owner.as_str())
    }

    async fn create_deduction(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        new_deduction: NewScheduledDeduction,
    ) -> Result<ScheduledDeduction> {
        let draft = new_deduction.into_draft(wallet_id)?;
        debug!(
            "Scheduling {} deduction of {} on wallet {}",
            draft.frequency, draft.amount, wallet_id
        );
        self.repository.create(owner.as_str(), draft).await
    }

    async fn update_deduction(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner: &OwnerScope,
        patch: DeductionPatch,
    ) -> Result<ScheduledDeduction> {
        let patch = patch.validated()?;
        self.repository
            .apply_patch(deduction_id, wallet_id, owner.as_str(), patch)
            .await
    }

    async fn delete_deduction(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner: &OwnerScope,
    ) -> Result<()> {
        self.repository
            .delete(deduction_id, wallet_id, owner.as_str())
            .await
    }
}
