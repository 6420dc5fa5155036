//! Share-management authorization gate.
//!
//! Decides whether the current actor may create or update the shares of
//! one resource. Resolution order:
//! 1. Owner check: the recorded owner always manages shares.
//! 2. Share entry: the actor's own entry must be at least `Share`.
//! 3. Capability flags: the coarse-grained `create`/`update` grants are
//!    ANDed onto the result.
//!
//! Every function here is pure and cheap enough to re-run on each render.

use serde::{Deserialize, Serialize};

use sharegate_core::traits::Authorizer;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::{PermissionLevel, SharingAction};
use sharegate_entity::share::Share;

use super::checker::{is_owner, level_of};

/// Coarse-grained, resource-type scoped capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    /// May create shares at all.
    pub can_create_shares: bool,
    /// May update or revoke shares at all.
    pub can_update_shares: bool,
}

impl CapabilityFlags {
    /// Resolve both flags from an authorizer.
    pub fn resolve(authorizer: &dyn Authorizer) -> Self {
        Self {
            can_create_shares: authorizer.has_auth(SharingAction::SharingCreate.as_str()),
            can_update_shares: authorizer.has_auth(SharingAction::SharingUpdate.as_str()),
        }
    }

    /// Both flags set.
    pub fn all() -> Self {
        Self {
            can_create_shares: true,
            can_update_shares: true,
        }
    }
}

/// Why the actor may (or may not) manage shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "level")]
pub enum ShareAuthority {
    /// The actor owns the resource.
    Owner,
    /// The actor's own share entry grants at least `Share`.
    ShareEntry(PermissionLevel),
    /// Neither applies; carries the actor's (insufficient) level.
    Denied(PermissionLevel),
}

/// Result of evaluating the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Owner, or share entry at least `Share`.
    pub has_share_permission: bool,
    /// May add principals.
    pub can_create: bool,
    /// May change levels, delete rows, and submit edits.
    pub can_edit: bool,
    /// Where `has_share_permission` came from.
    pub authority: ShareAuthority,
}

impl GateDecision {
    /// Whether any share-editing control should be shown.
    pub fn can_modify(&self) -> bool {
        self.can_create || self.can_edit
    }
}

/// Evaluates share-management permissions for one resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate {
    flags: CapabilityFlags,
}

impl AuthorizationGate {
    /// Creates a gate with the session's capability flags.
    pub fn new(flags: CapabilityFlags) -> Self {
        Self { flags }
    }

    /// The flags this gate was created with.
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// Whether the actor may manage shares, and why.
    ///
    /// An unset `owner_id` skips the ownership short-circuit; an unset
    /// `editor_id` has neither ownership nor an entry.
    pub fn share_authority(
        owner_id: Option<&PrincipalId>,
        editor_id: Option<&PrincipalId>,
        shares: &[Share],
    ) -> ShareAuthority {
        if is_owner(owner_id, editor_id) {
            return ShareAuthority::Owner;
        }
        let level = level_of(editor_id, shares);
        if level.at_least(PermissionLevel::Share) {
            ShareAuthority::ShareEntry(level)
        } else {
            ShareAuthority::Denied(level)
        }
    }

    /// Shorthand for `share_authority(..) != Denied`.
    pub fn has_share_permission(
        owner_id: Option<&PrincipalId>,
        editor_id: Option<&PrincipalId>,
        shares: &[Share],
    ) -> bool {
        !matches!(
            Self::share_authority(owner_id, editor_id, shares),
            ShareAuthority::Denied(_)
        )
    }

    /// Evaluates the full decision.
    pub fn evaluate(
        &self,
        owner_id: Option<&PrincipalId>,
        editor_id: Option<&PrincipalId>,
        shares: &[Share],
    ) -> GateDecision {
        let authority = Self::share_authority(owner_id, editor_id, shares);
        let has_share_permission = !matches!(authority, ShareAuthority::Denied(_));
        GateDecision {
            has_share_permission,
            can_create: self.flags.can_create_shares && has_share_permission,
            can_edit: self.flags.can_update_shares && has_share_permission,
            authority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::principal::PrincipalRef;
    use sharegate_entity::resource::ResourceRef;

    fn id(s: &str) -> PrincipalId {
        PrincipalId::new(s)
    }

    fn share(principal: &str, level: PermissionLevel) -> Share {
        Share::direct(
            PrincipalRef::user(principal),
            ResourceRef::new("datasource", "ds-1"),
            level,
        )
    }

    #[test]
    fn test_owner_short_circuits() {
        let gate = AuthorizationGate::new(CapabilityFlags::all());
        let decision = gate.evaluate(Some(&id("olga")), Some(&id("olga")), &[]);
        assert!(decision.has_share_permission);
        assert!(decision.can_create && decision.can_edit);
        assert_eq!(decision.authority, ShareAuthority::Owner);
    }

    #[test]
    fn test_share_entry_threshold() {
        let shares = vec![share("eve", PermissionLevel::Edit)];
        assert_eq!(
            AuthorizationGate::share_authority(Some(&id("olga")), Some(&id("eve")), &shares),
            ShareAuthority::Denied(PermissionLevel::Edit)
        );

        let shares = vec![share("eve", PermissionLevel::Share)];
        assert!(AuthorizationGate::has_share_permission(
            Some(&id("olga")),
            Some(&id("eve")),
            &shares
        ));
    }

    #[test]
    fn test_flags_are_anded() {
        let gate = AuthorizationGate::new(CapabilityFlags {
            can_create_shares: true,
            can_update_shares: false,
        });
        let decision = gate.evaluate(Some(&id("olga")), Some(&id("olga")), &[]);
        assert!(decision.can_create);
        assert!(!decision.can_edit);
        assert!(decision.can_modify());

        let decision = gate.evaluate(Some(&id("olga")), Some(&id("eve")), &[]);
        assert!(!decision.can_create);
        assert!(!decision.can_modify());
    }

    #[test]
    fn test_unset_owner_uses_entry_only() {
        let shares = vec![share("eve", PermissionLevel::All)];
        assert!(AuthorizationGate::has_share_permission(None, Some(&id("eve")), &shares));
        assert!(!AuthorizationGate::has_share_permission(None, Some(&id("eve")), &[]));
        // Both unset must not count as ownership.
        assert!(!AuthorizationGate::has_share_permission(None, None, &[]));
    }
}
