//! Penalty and progress calculator.
//!
//! Pure functions of a wallet snapshot and a point in time. Nothing here reads
//! a clock or touches storage, so every derived field can be reproduced from
//! the same inputs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::wallets_model::Wallet;
use crate::constants::DECIMAL_PRECISION;
use crate::utils::time_utils::{date_start_utc, days_until_ceil};

const HUNDRED: Decimal = dec!(100);

/// Lock state of a wallet at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockStatus {
    /// Early withdrawals are penalized.
    Locked,
    /// The wallet is flagged locked but its target date has arrived.
    UnlockedPastDate,
    /// The lock flag was cleared by an explicit update.
    Unlocked,
}

impl LockStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockStatus::Locked)
    }
}

/// Fields derived from a wallet and the current time. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    pub progress_percentage: Decimal,
    pub lock_status: LockStatus,
    pub can_withdraw_without_penalty: bool,
    pub days_remaining: i64,
    pub potential_penalty: Decimal,
    pub remaining_amount: Decimal,
}

pub fn lock_status(
    is_locked: bool,
    target_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> LockStatus {
    if !is_locked {
        return LockStatus::Unlocked;
    }
    match target_date {
        Some(date) if date_start_utc(date) <= now => LockStatus::UnlockedPastDate,
        _ => LockStatus::Locked,
    }
}

/// `current / target * 100`, clamped to `[0, 100]`. Zero when there is no
/// positive target.
pub fn progress_percentage(current_amount: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO || current_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if current_amount >= target_amount {
        return HUNDRED;
    }
    round(current_amount / target_amount * HUNDRED)
}

/// `amount * percentage / 100`, without overflowing on very large balances.
pub fn percentage_of(amount: Decimal, percentage: Decimal) -> Decimal {
    let value = amount
        .checked_mul(percentage)
        .map(|scaled| scaled / HUNDRED)
        .unwrap_or_else(|| amount / HUNDRED * percentage);
    round(value)
}

pub fn derive_metrics(wallet: &Wallet, now: DateTime<Utc>) -> WalletMetrics {
    let status = lock_status(wallet.is_locked, wallet.target_date, now);

    let (days_remaining, potential_penalty) = if status.is_locked() {
        // A dateless lock has no countdown but still carries penalty exposure.
        let days = wallet
            .target_date
            .map(|date| days_until_ceil(now, date_start_utc(date)))
            .unwrap_or(0);
        (
            days,
            percentage_of(wallet.current_amount, wallet.penalty_percentage),
        )
    } else {
        (0, Decimal::ZERO)
    };

    WalletMetrics {
        progress_percentage: progress_percentage(wallet.current_amount, wallet.target_amount),
        lock_status: status,
        can_withdraw_without_penalty: !status.is_locked(),
        days_remaining,
        potential_penalty,
        remaining_amount: (wallet.target_amount - wallet.current_amount).max(Decimal::ZERO),
    }
}

/// Penalty charged for withdrawing `amount` from `wallet` at `now`.
pub fn withdrawal_penalty(wallet: &Wallet, amount: Decimal, now: DateTime<Utc>) -> Decimal {
    if lock_status(wallet.is_locked, wallet.target_date, now).is_locked() {
        percentage_of(amount, wallet.penalty_percentage)
    } else {
        Decimal::ZERO
    }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp(DECIMAL_PRECISION).normalize()
}
