//! Caller identity as seen by the core.
//!
//! The identity collaborator authenticates the caller; the core only needs the
//! owner id it resolved to. Every service operation takes an [`OwnerScope`], so
//! an empty identity is rejected before any repository is touched.

use std::fmt;

use crate::errors::{Error, Result};

/// A verified, non-empty owner id that scopes every wallet operation.
///
/// The id is kept exactly as the identity provider issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerScope(String);

impl OwnerScope {
    pub fn new(owner_id: impl Into<String>) -> Result<Self> {
        let owner_id = owner_id.into();
        if owner_id.trim().is_empty() {
            return Err(Error::Unauthorized("missing caller identity".to_string()));
        }
        Ok(Self(owner_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_blank_owner_is_unauthorized() {
        let err = OwnerScope::new("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_owner_id_is_kept_verbatim() {
        let padded = OwnerScope::new(" alice").unwrap();
        let plain = OwnerScope::new("alice").unwrap();
        assert_eq!(padded.as_str(), " alice");
        assert_ne!(padded, plain);
    }
}
