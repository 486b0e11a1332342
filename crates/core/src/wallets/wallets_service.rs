use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rust_decimal::Decimal;

use super::wallets_calculator::{derive_metrics, withdrawal_penalty};
use super::wallets_model::{
    BalanceAdjustment, NewWallet, WalletPatch, WalletSnapshot, WalletView, WithdrawalReceipt,
};
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::constants::DEFAULT_PENALTY_PERCENTAGE;
use crate::errors::Result;
use crate::identity::OwnerScope;
use crate::utils::validation::ensure_positive;

/// Source of the current time. Injected so derived fields can be tested with
/// a fixed instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Service orchestrating wallet validation, persistence and derived views.
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
    clock: Clock,
    default_penalty: Decimal,
}

impl WalletService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>) -> Self {
        Self {
            repository,
            clock: Arc::new(Utc::now),
            default_penalty: DEFAULT_PENALTY_PERCENTAGE,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the penalty used when a new wallet does not specify one.
    pub fn with_default_penalty(mut self, penalty_percentage: Decimal) -> Self {
        self.default_penalty = penalty_percentage;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn view(snapshot: WalletSnapshot, now: DateTime<Utc>) -> WalletView {
        let metrics = derive_metrics(&snapshot.wallet, now);
        WalletView {
            wallet: snapshot.wallet,
            metrics,
            deductions: snapshot.deductions,
        }
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    /// Every wallet in the response is derived against the same instant.
    fn list_wallets(&self, owner: &OwnerScope) -> Result<Vec<WalletView>> {
        let snapshots = self.repository.list(owner.as_str())?;
        let now = self.now();
        Ok(snapshots
            .into_iter()
            .map(|snapshot| Self::view(snapshot, now))
            .collect())
    }

    fn get_wallet(&self, wallet_id: &str, owner: &OwnerScope) -> Result<WalletView> {
        let snapshot = self.repository.get_by_id(wallet_id, owner.as_str())?;
        Ok(Self::view(snapshot, self.now()))
    }

    async fn create_wallet(&self, owner: &OwnerScope, new_wallet: NewWallet) -> Result<WalletView> {
        let draft = new_wallet.into_draft(owner, self.default_penalty)?;
        debug!(
            "Creating wallet '{}' for owner {} with target {}",
            draft.name, owner, draft.target_amount
        );
        let wallet = self.repository.create(draft).await?;
        info!("Created wallet {} for owner {}", wallet.id, owner);
        Ok(Self::view(WalletSnapshot::from(wallet), self.now()))
    }

    async fn update_wallet(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        patch: WalletPatch,
    ) -> Result<WalletView> {
        let patch = patch.validated()?;
        let snapshot = self
            .repository
            .apply_patch(wallet_id, owner.as_str(), patch)
            .await?;
        debug!("Updated wallet {} for owner {}", wallet_id, owner);
        Ok(Self::view(snapshot, self.now()))
    }

    async fn delete_wallet(&self, wallet_id: &str, owner: &OwnerScope) -> Result<()> {
        self.repository
            .delete_if_empty(wallet_id, owner.as_str())
            .await?;
        info!("Deleted wallet {} for owner {}", wallet_id, owner);
        Ok(())
    }

    async fn deposit(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        amount: Decimal,
    ) -> Result<WalletView> {
        ensure_positive("amount", amount)?;
        let snapshot = self
            .repository
            .adjust_balance(wallet_id, owner.as_str(), BalanceAdjustment::Deposit(amount))
            .await?;
        debug!("Deposited {} into wallet {}", amount, wallet_id);
        Ok(Self::view(snapshot, self.now()))
    }

    async fn withdraw(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        amount: Decimal,
    ) -> Result<WithdrawalReceipt> {
        ensure_positive("amount", amount)?;
        let snapshot = self
            .repository
            .adjust_balance(
                wallet_id,
                owner.as_str(),
                BalanceAdjustment::Withdrawal(amount),
            )
            .await?;

        let now = self.now();
        let penalty = withdrawal_penalty(&snapshot.wallet, amount, now);
        if penalty > Decimal::ZERO {
            info!(
                "Early withdrawal of {} from locked wallet {} incurs penalty {}",
                amount, wallet_id, penalty
            );
        }

        Ok(WithdrawalReceipt {
            wallet: Self::view(snapshot, now),
            amount,
            penalty,
            net_amount: amount - penalty,
        })
    }
}
