//! Wallet domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wallets_calculator::WalletMetrics;
use crate::constants::MAX_PENALTY_PERCENTAGE;
use crate::deductions::DeductionSummary;
use crate::errors::{Error, Result, ValidationError};
use crate::identity::OwnerScope;
use crate::utils::validation::{ensure_positive, require_text};

/// Domain model representing a persisted savings wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub is_locked: bool,
    pub penalty_percentage: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a wallet, as received from a caller.
///
/// Fields are optional so that an absent value surfaces as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub penalty_percentage: Option<Decimal>,
}

/// A validated wallet ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletDraft {
    pub owner_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub is_locked: bool,
    pub penalty_percentage: Decimal,
}

impl NewWallet {
    /// Validates the request and fills in creation defaults.
    ///
    /// New wallets always start empty and locked.
    pub fn into_draft(self, owner: &OwnerScope, default_penalty: Decimal) -> Result<WalletDraft> {
        let name = require_text("name", self.name.as_deref().unwrap_or_default())?;

        let target_amount = self.target_amount.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("targetAmount".to_string()))
        })?;
        validate_target_amount(target_amount)?;

        let penalty_percentage = self.penalty_percentage.unwrap_or(default_penalty);
        validate_penalty_percentage(penalty_percentage)?;

        Ok(WalletDraft {
            owner_id: owner.as_str().to_string(),
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            target_date: self.target_date,
            is_locked: true,
            penalty_percentage,
        })
    }
}

/// Sparse update for a wallet. Only fields that are `Some` are written.
///
/// `target_date` is doubly optional: `None` leaves it untouched, `Some(None)`
/// clears the deadline and `Some(Some(date))` sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_percentage: Option<Decimal>,
}

impl WalletPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.target_date.is_none()
            && self.is_locked.is_none()
            && self.penalty_percentage.is_none()
    }

    /// Validates the patch and normalizes the name.
    pub fn validated(mut self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::invalid_input("no fields to update"));
        }
        if let Some(name) = self.name.take() {
            self.name = Some(require_text("name", &name)?);
        }
        if let Some(target_amount) = self.target_amount {
            validate_target_amount(target_amount)?;
        }
        if let Some(penalty) = self.penalty_percentage {
            validate_penalty_percentage(penalty)?;
        }
        Ok(self)
    }
}

/// A change to a wallet's stored balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAdjustment {
    Deposit(Decimal),
    Withdrawal(Decimal),
}

impl BalanceAdjustment {
    /// Applies the adjustment to a balance.
    ///
    /// A withdrawal that would take the balance below zero is a `Conflict`; a
    /// deposit the balance cannot represent is a validation error.
    pub fn apply_to(&self, balance: Decimal) -> Result<Decimal> {
        match self {
            BalanceAdjustment::Deposit(amount) => balance
                .checked_add(*amount)
                .ok_or_else(|| Error::invalid_input("amount is too large")),
            BalanceAdjustment::Withdrawal(amount) => balance
                .checked_sub(*amount)
                .filter(|next| *next >= Decimal::ZERO)
                .ok_or_else(|| Error::Conflict("insufficient funds".to_string())),
        }
    }
}

/// A wallet together with its deduction aggregate, read from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub wallet: Wallet,
    pub deductions: DeductionSummary,
}

impl From<Wallet> for WalletSnapshot {
    fn from(wallet: Wallet) -> Self {
        Self {
            wallet,
            deductions: DeductionSummary::default(),
        }
    }
}

/// Wallet fields plus every derived field, as returned to callers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    #[serde(flatten)]
    pub wallet: Wallet,
    #[serde(flatten)]
    pub metrics: WalletMetrics,
    #[serde(flatten)]
    pub deductions: DeductionSummary,
}

/// Outcome of a withdrawal: the updated wallet and what the caller receives.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    pub wallet: WalletView,
    pub amount: Decimal,
    pub penalty: Decimal,
    pub net_amount: Decimal,
}

fn validate_target_amount(target_amount: Decimal) -> Result<()> {
    ensure_positive("targetAmount", target_amount)
}

fn validate_penalty_percentage(penalty: Decimal) -> Result<()> {
    if penalty < Decimal::ZERO || penalty > MAX_PENALTY_PERCENTAGE {
        return Err(Error::invalid_input(
            "penaltyPercentage must be between 0 and 100",
        ));
    }
    Ok(())
}
