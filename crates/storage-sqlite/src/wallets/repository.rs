use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use lockbox_core::deductions::DeductionSummary;
use lockbox_core::errors::{Error, Result};
use lockbox_core::wallets::{
    BalanceAdjustment, Wallet, WalletDraft, WalletPatch, WalletRepositoryTrait, WalletSnapshot,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::{parse_decimal, NewWalletDB, WalletChangesetDB, WalletDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{scheduled_deductions, wallets};
use crate::utils::{chunk_for_sqlite, next_updated_at, now_utc};

pub struct WalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WalletRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WalletRepository { pool, writer }
    }
}

fn not_found(wallet_id: &str) -> Error {
    Error::NotFound(format!("Wallet {}", wallet_id))
}

/// Loads a wallet row, treating another owner's wallet as missing.
pub(crate) fn find_owned(
    conn: &mut SqliteConnection,
    wallet_id: &str,
    owner_id: &str,
) -> std::result::Result<WalletDB, StorageError> {
    wallets::table
        .filter(wallets::id.eq(wallet_id))
        .filter(wallets::owner_id.eq(owner_id))
        .select(WalletDB::as_select())
        .first::<WalletDB>(conn)
        .optional()?
        .ok_or_else(|| StorageError::Core(not_found(wallet_id)))
}

fn summary_for(
    conn: &mut SqliteConnection,
    wallet_id: &str,
) -> std::result::Result<DeductionSummary, StorageError> {
    let rows = scheduled_deductions::table
        .filter(scheduled_deductions::wallet_id.eq(wallet_id))
        .select((scheduled_deductions::amount, scheduled_deductions::is_active))
        .load::<(String, bool)>(conn)?;
    summarize(rows)
}

fn summarize(rows: Vec<(String, bool)>) -> std::result::Result<DeductionSummary, StorageError> {
    let parsed = rows
        .into_iter()
        .map(|(amount, is_active)| {
            parse_decimal("scheduled_deductions.amount", &amount).map(|a| (a, is_active))
        })
        .collect::<std::result::Result<Vec<(Decimal, bool)>, _>>()?;
    Ok(DeductionSummary::aggregate(parsed))
}

fn snapshot(
    conn: &mut SqliteConnection,
    row: WalletDB,
) -> std::result::Result<WalletSnapshot, StorageError> {
    let deductions = summary_for(conn, &row.id)?;
    Ok(WalletSnapshot {
        wallet: Wallet::try_from(row)?,
        deductions,
    })
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    fn get_by_id(&self, wallet_id: &str, owner_id: &str) -> Result<WalletSnapshot> {
        let mut pooled = get_connection(&self.pool)?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.transaction::<_, StorageError, _>(|c| {
            let row = find_owned(c, wallet_id, owner_id)?;
            snapshot(c, row)
        })
        .map_err(Error::from)
    }

    fn list(&self, owner_id: &str) -> Result<Vec<WalletSnapshot>> {
        let mut pooled = get_connection(&self.pool)?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.transaction::<_, StorageError, _>(|c| {
            let rows = wallets::table
                .filter(wallets::owner_id.eq(owner_id))
                .order((wallets::created_at.desc(), wallets::id.desc()))
                .select(WalletDB::as_select())
                .load::<WalletDB>(c)?;

            let ids: Vec<String> = rows.iter().map(|w| w.id.clone()).collect();
            let mut by_wallet: HashMap<String, Vec<(String, bool)>> = HashMap::new();
            for chunk in chunk_for_sqlite(&ids) {
                let deduction_rows = scheduled_deductions::table
                    .filter(scheduled_deductions::wallet_id.eq_any(chunk))
                    .select((
                        scheduled_deductions::wallet_id,
                        scheduled_deductions::amount,
                        scheduled_deductions::is_active,
                    ))
                    .load::<(String, String, bool)>(c)?;
                for (wallet_id, amount, is_active) in deduction_rows {
                    by_wallet
                        .entry(wallet_id)
                        .or_default()
                        .push((amount, is_active));
                }
            }

            rows.into_iter()
                .map(|row| -> std::result::Result<WalletSnapshot, StorageError> {
                    let deductions = summarize(by_wallet.remove(&row.id).unwrap_or_default())?;
                    Ok(WalletSnapshot {
                        wallet: Wallet::try_from(row)?,
                        deductions,
                    })
                })
                .collect()
        })
        .map_err(Error::from)
    }

    async fn create(&self, draft: WalletDraft) -> Result<Wallet> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Wallet> {
                let new_wallet = NewWalletDB::from_draft(
                    Uuid::now_v7().to_string(),
                    draft,
                    now_utc(),
                );
                let row = diesel::insert_into(wallets::table)
                    .values(&new_wallet)
                    .returning(WalletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Wallet::try_from(row)?)
            })
            .await
    }

    async fn apply_patch(
        &self,
        wallet_id: &str,
        owner_id: &str,
        patch: WalletPatch,
    ) -> Result<WalletSnapshot> {
        let wallet_id = wallet_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WalletSnapshot> {
                let existing = find_owned(conn, &wallet_id, &owner_id)?;

                let mut changes = WalletChangesetDB::from(patch);
                changes.updated_at = Some(next_updated_at(existing.updated_at));

                let row = diesel::update(
                    wallets::table
                        .filter(wallets::id.eq(&wallet_id))
                        .filter(wallets::owner_id.eq(&owner_id)),
                )
                .set(&changes)
                .returning(WalletDB::as_returning())
                .get_result(conn)
                .map_err(StorageError::from)?;

                Ok(snapshot(conn, row)?)
            })
            .await
    }

    async fn adjust_balance(
        &self,
        wallet_id: &str,
        owner_id: &str,
        adjustment: BalanceAdjustment,
    ) -> Result<WalletSnapshot> {
        let wallet_id = wallet_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WalletSnapshot> {
                let existing = find_owned(conn, &wallet_id, &owner_id)?;
                let balance = parse_decimal("wallets.current_amount", &existing.current_amount)?;

                let next = adjustment.apply_to(balance).inspect_err(|e| {
                    debug!(
                        "Wallet {} balance {} rejected {:?}: {}",
                        wallet_id, balance, adjustment, e
                    );
                })?;

                let changes = WalletChangesetDB {
                    current_amount: Some(next.to_string()),
                    updated_at: Some(next_updated_at(existing.updated_at)),
                    ..Default::default()
                };
                let row = diesel::update(wallets::table.find(&wallet_id))
                    .set(&changes)
                    .returning(WalletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                debug!("Wallet {} balance {} -> {}", wallet_id, balance, next);
                Ok(snapshot(conn, row)?)
            })
            .await
    }

    async fn delete_if_empty(&self, wallet_id: &str, owner_id: &str) -> Result<()> {
        let wallet_id = wallet_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let existing = find_owned(conn, &wallet_id, &owner_id)?;
                let balance = parse_decimal("wallets.current_amount", &existing.current_amount)?;
                if balance > Decimal::ZERO {
                    return Err(Error::Conflict(
                        "wallet has savings, withdraw first".to_string(),
                    ));
                }

                diesel::delete(
                    scheduled_deductions::table
                        .filter(scheduled_deductions::wallet_id.eq(&wallet_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                diesel::delete(wallets::table.find(&wallet_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
