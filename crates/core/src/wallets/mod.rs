//! Wallets module - domain models, calculator, services, and traits.

mod wallets_calculator;
mod wallets_model;
mod wallets_service;
mod wallets_traits;



pub use wallets_calculator::{
    derive_metrics, lock_status, percentage_of, progress_percentage, withdrawal_penalty,
    LockStatus, WalletMetrics,
};
pub use wallets_model::{
    BalanceAdjustment, NewWallet, Wallet, WalletDraft, WalletPatch, WalletSnapshot, WalletView,
    WithdrawalReceipt,
};
pub use wallets_service::{Clock, WalletService};
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
