//! Scheduled deduction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::ensure_positive;

/// How often a scheduled deduction contributes to its wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeductionFrequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
}

impl DeductionFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionFrequency::Daily => "daily",
            DeductionFrequency::Weekly => "weekly",
            DeductionFrequency::Biweekly => "biweekly",
            DeductionFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for DeductionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeductionFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(DeductionFrequency::Daily),
            "weekly" => Ok(DeductionFrequency::Weekly),
            "biweekly" => Ok(DeductionFrequency::Biweekly),
            "monthly" => Ok(DeductionFrequency::Monthly),
            other => Err(Error::invalid_input(format!(
                "Unknown deduction frequency '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a recurring contribution rule on a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDeduction {
    pub id: String,
    pub wallet_id: String,
    pub amount: Decimal,
    pub frequency: DeductionFrequency,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a scheduled deduction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduledDeduction {
    pub amount: Option<Decimal>,
    pub frequency: Option<DeductionFrequency>,
    pub is_active: Option<bool>,
}

/// A validated deduction ready to be inserted under `wallet_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionDraft {
    pub wallet_id: String,
    pub amount: Decimal,
    pub frequency: DeductionFrequency,
    pub is_active: bool,
}

impl NewScheduledDeduction {
    /// New deductions are active unless the caller says otherwise.
    pub fn into_draft(self, wallet_id: &str) -> Result<DeductionDraft> {
        let amount = self.amount.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("amount".to_string()))
        })?;
        ensure_positive("amount", amount)?;
        Ok(DeductionDraft {
            wallet_id: wallet_id.to_string(),
            amount,
            frequency: self.frequency.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Sparse update for a scheduled deduction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeductionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<DeductionFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl DeductionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.frequency.is_none() && self.is_active.is_none()
    }

    pub fn validated(self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::invalid_input("no fields to update"));
        }
        if let Some(amount) = self.amount {
            ensure_positive("amount", amount)?;
        }
        Ok(self)
    }
}

/// Reduction of a wallet's deductions into summary counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeductionSummary {
    /// Every deduction on the wallet, active or not.
    pub deduction_count: u64,
    /// Sum of the amounts of active deductions only.
    pub active_deduction_total: Decimal,
}

impl DeductionSummary {
    /// Folds `(amount, is_active)` pairs into a summary.
    pub fn aggregate<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Decimal, bool)>,
    {
        rows.into_iter()
            .fold(Self::default(), |mut summary, (amount, is_active)| {
                summary.deduction_count += 1;
                if is_active {
                    summary.active_deduction_total =
                        summary.active_deduction_total.saturating_add(amount);
                }
                summary
            })
    }

    pub fn from_deductions<'a, I>(deductions: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduledDeduction>,
    {
        Self::aggregate(deductions.into_iter().map(|d| (d.amount, d.is_active)))
    }
}
