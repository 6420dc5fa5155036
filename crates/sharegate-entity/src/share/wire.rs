//! Wire shapes exchanged with the shares API.

use serde::{Deserialize, Serialize};

use sharegate_core::types::{PrincipalId, ResourceId, ShareId};

use crate::permission::PermissionLevel;
use crate::principal::{PrincipalKind, PrincipalRef};
use crate::resource::ResourceRef;

use super::model::{Share, ShareOrigin};

/// One grant to create or overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareUpsert {
    /// Resource the grant applies to.
    #[serde(flatten)]
    pub resource: ResourceRef,
    /// Principal kind.
    pub principal_type: PrincipalKind,
    /// Principal receiving the grant.
    pub principal_id: PrincipalId,
    /// Level granted.
    pub permission: PermissionLevel,
}

impl From<&Share> for ShareUpsert {
    fn from(share: &Share) -> Self {
        Self {
            resource: share.resource.clone(),
            principal_type: share.principal.kind,
            principal_id: share.principal.id.clone(),
            permission: share.permission,
        }
    }
}

/// One grant to revoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRevoke {
    /// Backend record id of the grant, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShareId>,
    /// Principal kind.
    pub principal_type: PrincipalKind,
    /// Principal losing the grant.
    pub principal_id: PrincipalId,
    /// Last known level, kept for audit.
    pub permission: PermissionLevel,
}

impl From<&Share> for ShareRevoke {
    fn from(share: &Share) -> Self {
        Self {
            id: share.id.clone(),
            principal_type: share.principal.kind,
            principal_id: share.principal.id.clone(),
            permission: share.permission,
        }
    }
}

/// Atomic commit request for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    /// Resource type name.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource identifier.
    #[serde(rename = "id")]
    pub resource_id: ResourceId,
    /// Grants to create or overwrite.
    pub shares: Vec<ShareUpsert>,
    /// Grants to revoke.
    pub revokes: Vec<ShareRevoke>,
}

impl CommitRequest {
    /// Build a request for `resource`.
    pub fn new(resource: &ResourceRef, shares: Vec<ShareUpsert>, revokes: Vec<ShareRevoke>) -> Self {
        Self {
            resource_type: resource.kind.clone(),
            resource_id: resource.id.clone(),
            shares,
            revokes,
        }
    }

    /// The addressed resource (without path).
    pub fn resource(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type.clone(), self.resource_id.clone())
    }

    /// Whether the request carries no operations.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty() && self.revokes.is_empty()
    }

    /// The list `shares` turns into once this request is applied.
    ///
    /// Revoked principals are dropped. Each upsert replaces the principal's
    /// row with a direct grant, or appends one.
    pub fn apply_to(&self, shares: &[Share]) -> Vec<Share> {
        let mut applied: Vec<Share> = shares
            .iter()
            .filter(|s| !self.revokes.iter().any(|r| r.principal_id == s.principal.id))
            .cloned()
            .collect();

        for upsert in &self.shares {
            match applied.iter_mut().find(|s| s.principal.id == upsert.principal_id) {
                Some(row) => {
                    row.permission = upsert.permission;
                    row.origin = ShareOrigin::Direct;
                    row.marked_for_removal = false;
                }
                None => {
                    let principal = PrincipalRef {
                        id: upsert.principal_id.clone(),
                        kind: upsert.principal_type,
                    };
                    applied.push(Share::direct(principal, upsert.resource.clone(), upsert.permission));
                }
            }
        }
        applied
    }
}
