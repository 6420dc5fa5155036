//! Property tests for the share-management gate.

use proptest::prelude::*;

use sharegate_auth::{AuthorizationGate, CapabilityFlags};
use sharegate_core::types::PrincipalId;
use sharegate_entity::{PermissionLevel, PrincipalRef, ResourceRef, Share};

const PRINCIPALS: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];

fn arb_level() -> impl Strategy<Value = PermissionLevel> {
    prop::sample::select(PermissionLevel::ALL_LEVELS.to_vec())
}

fn arb_share() -> impl Strategy<Value = Share> {
    (prop::sample::select(PRINCIPALS.to_vec()), arb_level(), any::<bool>()).prop_map(
        |(id, level, inherited)| {
            let principal = PrincipalRef::user(id);
            let resource = ResourceRef::new("document", "doc-1");
            if inherited {
                Share::inherited(principal, resource, level)
            } else {
                Share::direct(principal, resource, level)
            }
        },
    )
}

fn arb_flags() -> impl Strategy<Value = CapabilityFlags> {
    (any::<bool>(), any::<bool>()).prop_map(|(c, u)| CapabilityFlags {
        can_create_shares: c,
        can_update_shares: u,
    })
}

proptest! {
    #[test]
    fn owner_always_has_share_permission(
        shares in prop::collection::vec(arb_share(), 0..8),
        who in prop::sample::select(PRINCIPALS.to_vec()),
    ) {
        let id = PrincipalId::new(who);
        prop_assert!(AuthorizationGate::has_share_permission(Some(&id), Some(&id), &shares));
    }

    #[test]
    fn editor_without_entry_depends_only_on_ownership(
        shares in prop::collection::vec(arb_share(), 0..8),
        owner in prop::sample::select(PRINCIPALS.to_vec()),
    ) {
        let editor = PrincipalId::new("zoe");
        let owner = PrincipalId::new(owner);
        prop_assert!(!AuthorizationGate::has_share_permission(Some(&owner), Some(&editor), &shares));
        prop_assert!(AuthorizationGate::has_share_permission(Some(&editor), Some(&editor), &shares));
    }

    #[test]
    fn capabilities_never_exceed_share_permission(
        shares in prop::collection::vec(arb_share(), 0..8),
        editor in prop::sample::select(PRINCIPALS.to_vec()),
        flags in arb_flags(),
    ) {
        let editor = PrincipalId::new(editor);
        let owner = PrincipalId::new("olga");
        let decision = AuthorizationGate::new(flags).evaluate(Some(&owner), Some(&editor), &shares);
        prop_assert_eq!(decision.can_create, flags.can_create_shares && decision.has_share_permission);
        prop_assert_eq!(decision.can_edit, flags.can_update_shares && decision.has_share_permission);
    }

    #[test]
    fn evaluation_is_deterministic(
        shares in prop::collection::vec(arb_share(), 0..8),
        editor in prop::sample::select(PRINCIPALS.to_vec()),
        flags in arb_flags(),
    ) {
        let editor = PrincipalId::new(editor);
        let gate = AuthorizationGate::new(flags);
        prop_assert_eq!(
            gate.evaluate(None, Some(&editor), &shares),
            gate.evaluate(None, Some(&editor), &shares)
        );
    }
}
