use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use lockbox_core::deductions::{
    DeductionDraft, DeductionPatch, DeductionRepositoryTrait, DeductionSummary,
    ScheduledDeduction,
};
use lockbox_core::errors::{Error, Result};
use uuid::Uuid;

use super::model::{DeductionChangesetDB, NewScheduledDeductionDB, ScheduledDeductionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::scheduled_deductions;
use crate::utils::{next_updated_at, now_utc};
use crate::wallets::find_owned;

pub struct DeductionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DeductionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DeductionRepository { pool, writer }
    }

    fn load_for_wallet(
        conn: &mut SqliteConnection,
        wallet_id: &str,
    ) -> std::result::Result<Vec<ScheduledDeduction>, StorageError> {
        scheduled_deductions::table
            .filter(scheduled_deductions::wallet_id.eq(wallet_id))
            .order((
                scheduled_deductions::created_at.asc(),
                scheduled_deductions::id.asc(),
            ))
            .select(ScheduledDeductionDB::as_select())
            .load::<ScheduledDeductionDB>(conn)?
            .into_iter()
            .map(ScheduledDeduction::try_from)
            .collect()
    }
}

fn find_deduction(
    conn: &mut SqliteConnection,
    deduction_id: &str,
    wallet_id: &str,
) -> std::result::Result<ScheduledDeductionDB, StorageError> {
    scheduled_deductions::table
        .filter(scheduled_deductions::id.eq(deduction_id))
        .filter(scheduled_deductions::wallet_id.eq(wallet_id))
        .select(ScheduledDeductionDB::as_select())
        .first::<ScheduledDeductionDB>(conn)
        .optional()?
        .ok_or_else(|| StorageError::Core(Error::NotFound(format!("Deduction {}", deduction_id))))
}

#[async_trait]
impl DeductionRepositoryTrait for DeductionRepository {
    fn list_for_wallet(&self, wallet_id: &str, owner_id: &str) -> Result<Vec<ScheduledDeduction>> {
        let mut pooled = get_connection(&self.pool)?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.transaction::<_, StorageError, _>(|c| {
            find_owned(c, wallet_id, owner_id)?;
            Self::load_for_wallet(c, wallet_id)
        })
        .map_err(Error::from)
    }

    fn aggregate(&self, wallet_id: &str, owner_id: &str) -> Result<DeductionSummary> {
        let mut pooled = get_connection(&self.pool)?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.transaction::<_, StorageError, _>(|c| {
            find_owned(c, wallet_id, owner_id)?;
            let deductions = Self::load_for_wallet(c, wallet_id)?;
            Ok(DeductionSummary::from_deductions(&deductions))
        })
        .map_err(Error::from)
    }

    async fn create(&self, owner_id: &str, draft: DeductionDraft) -> Result<ScheduledDeduction> {
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ScheduledDeduction> {
                find_owned(conn, &draft.wallet_id, &owner_id)?;
                let new_deduction = NewScheduledDeductionDB::from_draft(
                    Uuid::now_v7().to_string(),
                    draft,
                    now_utc(),
                );
                let row = diesel::insert_into(scheduled_deductions::table)
                    .values(&new_deduction)
                    .returning(ScheduledDeductionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ScheduledDeduction::try_from(row)?)
            })
            .await
    }

    async fn apply_patch(
        &self,
        deduction_id: &str,
        wallet_id: &str,
        owner_id: &str,
        patch: DeductionPatch,
    ) -> Result<ScheduledDeduction> {
        let deduction_id = deduction_id.to_string();
        let wallet_id = wallet_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ScheduledDeduction> {
                find_owned(conn, &wallet_id, &owner_id)?;
                let existing = find_deduction(conn, &deduction_id, &wallet_id)?;

                let mut changes = DeductionChangesetDB::from(patch);
                changes.updated_at = Some(next_updated_at(existing.updated_at));

                let row = diesel::update(scheduled_deductions::table.find(&deduction_id))
                    .set(&changes)
                    .returning(ScheduledDeductionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(ScheduledDeduction::try_from(row)?)
            })
            .await
    }

    async fn delete(&self, deduction_id: &str, wallet_id: &str, owner_id: &str) -> Result<()> {
        let deduction_id = deduction_id.to_string();
        let wallet_id = wallet_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                find_owned(conn, &wallet_id, &owner_id)?;
                find_deduction(conn, &deduction_id, &wallet_id)?;
                diesel::delete(scheduled_deductions::table.find(&deduction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
