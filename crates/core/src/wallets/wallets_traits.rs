//! Wallet repository and service traits.
//!
//! These traits define the contract for wallet operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::wallets_model::{
    BalanceAdjustment, NewWallet, Wallet, WalletDraft, WalletPatch, WalletSnapshot, WalletView,
    WithdrawalReceipt,
};
use crate::errors::Result;
use crate::identity::OwnerScope;

/// Trait defining the contract for Wallet repository operations.
///
/// Every method is scoped by owner. A wallet that exists under another owner
/// is reported exactly like a missing one.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Retrieves a wallet and its deduction aggregate from one read snapshot.
    fn get_by_id(&self, wallet_id: &str, owner_id: &str) -> Result<WalletSnapshot>;

    /// Lists an owner's wallets, newest first, each with its deduction aggregate.
    fn list(&self, owner_id: &str) -> Result<Vec<WalletSnapshot>>;

    /// Inserts a validated wallet.
    async fn create(&self, draft: WalletDraft) -> Result<Wallet>;

    /// Writes only the fields present in `patch` and refreshes `updated_at`
    /// in the same statement.
    async fn apply_patch(
        &self,
        wallet_id: &str,
        owner_id: &str,
        patch: WalletPatch,
    ) -> Result<WalletSnapshot>;

    /// Changes the stored balance. A withdrawal larger than the balance is a
    /// conflict and leaves the row untouched.
    async fn adjust_balance(
        &self,
        wallet_id: &str,
        owner_id: &str,
        adjustment: BalanceAdjustment,
    ) -> Result<WalletSnapshot>;

    /// Deletes the wallet and its deductions, but only while its balance is
    /// zero. The balance check and the delete are one atomic operation.
    async fn delete_if_empty(&self, wallet_id: &str, owner_id: &str) -> Result<()>;
}

/// Trait defining the contract for Wallet service operations.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    fn list_wallets(&self, owner: &OwnerScope) -> Result<Vec<WalletView>>;

    fn get_wallet(&self, wallet_id: &str, owner: &OwnerScope) -> Result<WalletView>;

    async fn create_wallet(&self, owner: &OwnerScope, new_wallet: NewWallet) -> Result<WalletView>;

    async fn update_wallet(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        patch: WalletPatch,
    ) -> Result<WalletView>;

    async fn delete_wallet(&self, wallet_id: &str, owner: &OwnerScope) -> Result<()>;

    async fn deposit(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        amount: Decimal,
    ) -> Result<WalletView>;

    async fn withdraw(
        &self,
        wallet_id: &str,
        owner: &OwnerScope,
        amount: Decimal,
    ) -> Result<WithdrawalReceipt>;
}
