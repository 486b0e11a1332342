//! Database models for wallets.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use lockbox_core::wallets::{Wallet, WalletDraft, WalletPatch};
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Database model for wallets. Money columns are stored as decimal text.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: Option<NaiveDate>,
    pub is_locked: bool,
    pub penalty_percentage: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new wallet
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::wallets)]
pub struct NewWalletDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: Option<NaiveDate>,
    pub is_locked: bool,
    pub penalty_percentage: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Sparse changeset. `None` fields are left out of the UPDATE statement;
/// `target_date: Some(None)` writes NULL.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::wallets)]
pub struct WalletChangesetDB {
    pub name: Option<String>,
    pub target_amount: Option<String>,
    pub current_amount: Option<String>,
    pub target_date: Option<Option<NaiveDate>>,
    pub is_locked: Option<bool>,
    pub penalty_percentage: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

pub(crate) fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw).map_err(|e| {
        StorageError::SerializationError(format!("invalid decimal in {}: '{}' ({})", column, raw, e))
    })
}

impl TryFrom<WalletDB> for Wallet {
    type Error = StorageError;

    fn try_from(db: WalletDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: parse_decimal("wallets.target_amount", &db.target_amount)?,
            current_amount: parse_decimal("wallets.current_amount", &db.current_amount)?,
            penalty_percentage: parse_decimal(
                "wallets.penalty_percentage",
                &db.penalty_percentage,
            )?,
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            target_date: db.target_date,
            is_locked: db.is_locked,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewWalletDB {
    pub fn from_draft(id: String, draft: WalletDraft, now: NaiveDateTime) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            name: draft.name,
            target_amount: draft.target_amount.to_string(),
            current_amount: draft.current_amount.to_string(),
            target_date: draft.target_date,
            is_locked: draft.is_locked,
            penalty_percentage: draft.penalty_percentage.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<WalletPatch> for WalletChangesetDB {
    fn from(patch: WalletPatch) -> Self {
        Self {
            name: patch.name,
            target_amount: patch.target_amount.map(|v| v.to_string()),
            current_amount: None,
            target_date: patch.target_date,
            is_locked: patch.is_locked,
            penalty_percentage: patch.penalty_percentage.map(|v| v.to_string()),
            updated_at: None,
        }
    }
}
