// crates/folio-ledger/src/access.rs
//
// Capability table for privileged ledger operations.
//
// Each privileged operation names the role it needs and asks the table
// whether the caller holds it. `Admin` implies every other role and is the
// only role allowed to grant or revoke roles.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use folio_core::error::FolioError;
use folio_core::principal::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    /// May publish a new citation integrity root.
    IntegrityOracle,
    /// May change the distribution period.
    Treasurer,
    /// May verify, revoke and overwrite identities.
    IdentityVerifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::IntegrityOracle => write!(f, "integrity_oracle"),
            Role::Treasurer => write!(f, "treasurer"),
            Role::IdentityVerifier => write!(f, "identity_verifier"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTable {
    grants: BTreeMap<Principal, BTreeSet<Role>>,
}

impl RoleTable {
    /// A table where each of `admins` holds `Role::Admin`.
    pub fn with_admins(admins: &[Principal]) -> Self {
        let mut table = Self::default();
        for admin in admins {
            table.grant(*admin, Role::Admin);
        }
        table
    }

    pub fn has_role(&self, who: &Principal, role: Role) -> bool {
        self.grants
            .get(who)
            .map(|roles| roles.contains(&role) || roles.contains(&Role::Admin))
            .unwrap_or(false)
    }

    /// `Unauthorized` unless `who` holds `role` (directly or through `Admin`).
    pub fn require(&self, who: &Principal, role: Role) -> Result<(), FolioError> {
        if self.has_role(who, role) {
            Ok(())
        } else {
            Err(FolioError::Unauthorized(format!(
                "{} lacks role {}",
                who.short(),
                role
            )))
        }
    }

    /// Returns false if the role was already held.
    pub fn grant(&mut self, who: Principal, role: Role) -> bool {
        self.grants.entry(who).or_default().insert(role)
    }

    /// Returns false if the role was not held.
    pub fn revoke(&mut self, who: &Principal, role: Role) -> bool {
        let Some(roles) = self.grants.get_mut(who) else {
            return false;
        };
        let removed = roles.remove(&role);
        if roles.is_empty() {
            self.grants.remove(who);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(b: u8) -> Principal {
        Principal([b; 32])
    }

    #[test]
    fn test_admin_implies_every_role() {
        let table = RoleTable::with_admins(&[p(1)]);
        for role in [Role::Admin, Role::IntegrityOracle, Role::Treasurer, Role::IdentityVerifier] {
            assert!(table.has_role(&p(1), role));
        }
        assert!(!table.has_role(&p(2), Role::Treasurer));
    }

    #[test]
    fn test_specific_role_does_not_imply_others() {
        let mut table = RoleTable::default();
        table.grant(p(1), Role::Treasurer);
        assert!(table.require(&p(1), Role::Treasurer).is_ok());
        assert!(matches!(
            table.require(&p(1), Role::IntegrityOracle),
            Err(FolioError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_grant_and_revoke_report_changes() {
        let mut table = RoleTable::default();
        assert!(table.grant(p(1), Role::Treasurer));
        assert!(!table.grant(p(1), Role::Treasurer));
        assert!(table.revoke(&p(1), Role::Treasurer));
        assert!(!table.revoke(&p(1), Role::Treasurer));
        assert!(!table.has_role(&p(1), Role::Treasurer));
        assert_eq!(table, RoleTable::default());
    }
}
