//! Database models for scheduled deductions.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use lockbox_core::deductions::{
    DeductionDraft, DeductionFrequency, DeductionPatch, ScheduledDeduction,
};

use crate::errors::StorageError;
use crate::wallets::{parse_decimal, WalletDB};

#[derive(Queryable, Identifiable, Selectable, Associations, PartialEq, Debug, Clone)]
#[diesel(belongs_to(WalletDB, foreign_key = wallet_id))]
#[diesel(table_name = crate::schema::scheduled_deductions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScheduledDeductionDB {
    pub id: String,
    pub wallet_id: String,
    pub amount: String,
    pub frequency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_deductions)]
pub struct NewScheduledDeductionDB {
    pub id: String,
    pub wallet_id: String,
    pub amount: String,
    pub frequency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::scheduled_deductions)]
pub struct DeductionChangesetDB {
    pub amount: Option<String>,
    pub frequency: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<ScheduledDeductionDB> for ScheduledDeduction {
    type Error = StorageError;

    fn try_from(db: ScheduledDeductionDB) -> Result<Self, Self::Error> {
        let frequency = DeductionFrequency::from_str(&db.frequency)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        Ok(Self {
            amount: parse_decimal("scheduled_deductions.amount", &db.amount)?,
            frequency,
            id: db.id,
            wallet_id: db.wallet_id,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewScheduledDeductionDB {
    pub fn from_draft(id: String, draft: DeductionDraft, now: NaiveDateTime) -> Self {
        Self {
            id,
            wallet_id: draft.wallet_id,
            amount: draft.amount.to_string(),
            frequency: draft.frequency.as_str().to_string(),
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<DeductionPatch> for DeductionChangesetDB {
    fn from(patch: DeductionPatch) -> Self {
        Self {
            amount: patch.amount.map(|v| v.to_string()),
            frequency: patch.frequency.map(|f| f.as_str().to_string()),
            is_active: patch.is_active,
            updated_at: None,
        }
    }
}
