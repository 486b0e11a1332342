use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use lockbox_core::errors::{Error, Result};
use lockbox_core::linked_accounts::{LinkedAccount, LinkedAccountRepositoryTrait, NewLinkedAccount};
use uuid::Uuid;

use super::model::{LinkedAccountDB, NewLinkedAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{is_unique_violation, StorageError};
use crate::schema::linked_accounts;
use crate::utils::now_utc;

pub struct LinkedAccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LinkedAccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LinkedAccountRepository { pool, writer }
    }
}

#[async_trait]
impl LinkedAccountRepositoryTrait for LinkedAccountRepository {
    fn list(&self, owner_id: &str) -> Result<Vec<LinkedAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = linked_accounts::table
            .filter(linked_accounts::owner_id.eq(owner_id))
            .order((linked_accounts::created_at.desc(), linked_accounts::id.desc()))
            .select(LinkedAccountDB::as_select())
            .load::<LinkedAccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(LinkedAccount::from).collect())
    }

    async fn insert(&self, owner_id: &str, account: NewLinkedAccount) -> Result<LinkedAccount> {
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LinkedAccount> {
                let row = NewLinkedAccountDB::new(
                    Uuid::now_v7().to_string(),
                    owner_id,
                    account,
                    now_utc(),
                );
                diesel::insert_into(linked_accounts::table)
                    .values(&row)
                    .returning(LinkedAccountDB::as_returning())
                    .get_result(conn)
                    .map(LinkedAccount::from)
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            Error::Conflict("account already linked".to_string())
                        } else {
                            StorageError::from(e).into()
                        }
                    })
            })
            .await
    }

    async fn delete(&self, linked_account_id: &str, owner_id: &str) -> Result<()> {
        let linked_account_id = linked_account_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let deleted = diesel::delete(
                    linked_accounts::table
                        .filter(linked_accounts::id.eq(&linked_account_id))
                        .filter(linked_accounts::owner_id.eq(&owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::NotFound(format!(
                        "Linked account {}",
                        linked_account_id
                    )));
                }
                Ok(())
            })
            .await
    }
}
