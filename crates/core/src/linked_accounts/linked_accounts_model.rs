//! External bank accounts linked to an owner.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::require_text;

/// Domain model representing an external account linked by an owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
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

/// Account metadata supplied by the account-linking provider, already
/// validated and tokenized on its side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLinkedAccount {
    pub external_account_id: String,
    pub institution_name: String,
    pub account_name: String,
    pub account_type: String,
    pub mask: Option<String>,
    pub provider: String,
}

impl NewLinkedAccount {
    /// Trims every field and rejects blanks. A blank mask is dropped.
    pub fn normalized(self) -> Result<Self> {
        Ok(Self {
            external_account_id: require_text("externalAccountId", &self.external_account_id)?,
            institution_name: require_text("institutionName", &self.institution_name)?,
            account_name: require_text("accountName", &self.account_name)?,
            account_type: require_text("accountType", &self.account_type)?,
            mask: self
                .mask
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            provider: require_text("provider", &self.provider)?,
        })
    }
}
