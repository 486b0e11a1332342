//! Database models for linked accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use lockbox_core::linked_accounts::{LinkedAccount, NewLinkedAccount};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::linked_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LinkedAccountDB {
    pub id: String,
    pub owner_id: String,
    pub external_account_id: String,
    pub institution_name: String,
    pub account_name: String,
    pub account_type: String,
    pub mask: Option<String>,
    pub provider: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::linked_accounts)]
pub struct NewLinkedAccountDB {
    pub id: String,
    pub owner_id: String,
    pub external_account_id: String,
    pub institution_name: String,
    pub account_name: String,
    pub account_type: String,
    pub mask: Option<String>,
    pub provider: String,
    pub created_at: NaiveDateTime,
}

impl From<LinkedAccountDB> for LinkedAccount {
    fn from(db: LinkedAccountDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            external_account_id: db.external_account_id,
            institution_name: db.institution_name,
            account_name: db.account_name,
            account_type: db.account_type,
            mask: db.mask,
            provider: db.provider,
            created_at: db.created_at,
        }
    }
}

impl NewLinkedAccountDB {
    pub fn new(id: String, owner_id: String, account: NewLinkedAccount, now: NaiveDateTime) -> Self {
        Self {
            id,
            owner_id,
            external_account_id: account.external_account_id,
            institution_name: account.institution_name,
            account_name: account.account_name,
            account_type: account.account_type,
            mask: account.mask,
            provider: account.provider,
            created_at: now,
        }
    }
}
