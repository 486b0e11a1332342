use async_trait::async_trait;

use super::deductions_model::{
    DeductionDraft, DeductionPatch, DeductionSummary, NewScheduledDeduction, ScheduledDeduction,
};
use crate::errors::Result;
use crate::identity::OwnerScope;

/// Persistence of scheduled deductions.
///
/// Deductions are reached through their wallet, so every call carries the
/// wallet's owner. A wallet owned by someone else is reported as not found.
#[async_trait]
pub trait DeductionRepositoryTrait: Send + Sync {
    fn list_for_wallet(&self, wallet_id: &str, owner_id: &str) -> Result<Vec<ScheduledDeduction>>;

    /// Count and active total read in a single snapshot.
    fn aggregate(&self, wallet_id: &str, owner_id: &str) -> Result<DeductionSummary>;

    async fn create(&self, owner_id: &str, draft: DeductionDraft) -> Result<ScheduledDeduction>;

    async fn apply_patch(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner_id: &str,
        patch: DeductionPatch,
    ) -> Result<ScheduledDeduction>;

    async fn delete(&self, deduction_id: &str, wallet_id: &str, owner_id: &str) -> Result<()>;
}

#[async_trait]
pub trait DeductionServiceTrait: Send + Sync {
    fn list_deductions(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
    ) -> Result<Vec<ScheduledDeduction>>;

    fn get_summary(&self, wallet_id: &str, owner: &OwnerScope) -> Result<DeductionSummary>;

    async fn create_deduction(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        new_deduction: NewScheduledDeduction,
    ) -> Result<ScheduledDeduction>;

    async fn update_deduction(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner: &OwnerScope,
        patch: DeductionPatch,
    ) -> Result<ScheduledDeduction>;

    async fn delete_deduction(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner: &OwnerScope,
    ) -> Result<()>;
}
