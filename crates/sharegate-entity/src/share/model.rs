//! Share entity model.

use serde::{Deserialize, Serialize};

use sharegate_core::types::{PrincipalId, ShareId};

use crate::permission::PermissionLevel;
use crate::principal::PrincipalRef;
use crate::resource::ResourceRef;

/// Where a share was granted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOrigin {
    /// Granted explicitly on this resource.
    #[default]
    Direct,
    /// Visible here because an ancestor resource grants it.
    Inherited,
}

impl ShareOrigin {
    /// Return the origin as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Inherited => "inherited",
        }
    }
}

impl std::fmt::Display for ShareOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grant of one permission level to one principal on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Share {
    /// Backend record id of the grant, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShareId>,
    /// Who receives the grant.
    pub principal: PrincipalRef,
    /// What the grant applies to.
    pub resource: ResourceRef,
    /// Level granted.
    pub permission: PermissionLevel,
    /// Direct or inherited.
    #[serde(default)]
    pub origin: ShareOrigin,
    /// The inherited marker has been removed from this row: it is now
    /// owned by this resource's direct grant list and may be re-sent or
    /// deleted. Meaningless on direct shares.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub marked_for_removal: bool,
}

impl Share {
    /// A direct share, as produced by the "add share" form.
    pub fn direct(
        principal: PrincipalRef,
        resource: ResourceRef,
        permission: PermissionLevel,
    ) -> Self {
        Self {
            id: None,
            principal,
            resource,
            permission,
            origin: ShareOrigin::Direct,
            marked_for_removal: false,
        }
    }

    /// A share inherited from an ancestor resource.
    pub fn inherited(
        principal: PrincipalRef,
        resource: ResourceRef,
        permission: PermissionLevel,
    ) -> Self {
        Self {
            origin: ShareOrigin::Inherited,
            ..Self::direct(principal, resource, permission)
        }
    }

    /// Attach the backend record id.
    pub fn with_id(mut self, id: impl Into<ShareId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The principal identifier.
    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal.id
    }

    /// Whether the share descends from an ancestor resource.
    pub fn is_inherited(&self) -> bool {
        self.origin == ShareOrigin::Inherited
    }

    /// Inherited and not flagged for removal: may be neither deleted nor
    /// sent as a direct grant.
    pub fn is_locked_inherited(&self) -> bool {
        self.is_inherited() && !self.marked_for_removal
    }

    /// Whether the share belongs to this resource's direct grant list and
    /// is therefore part of the upsert set on commit.
    pub fn is_owned_here(&self) -> bool {
        !self.is_locked_inherited()
    }
}
