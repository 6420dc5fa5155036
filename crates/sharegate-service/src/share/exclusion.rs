//! Principals that may not be offered again in the picker.

use std::collections::BTreeSet;

use sharegate_core::types::PrincipalId;
use sharegate_entity::share::Share;

/// Computes the principal ids the add-shares picker must hide or disable.
///
/// The set is every principal already on the list plus the owner and the
/// current actor. It is recomputed from whatever list is passed in, so
/// callers pass the draft's working list while a session is open.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrincipalExclusionResolver;

impl PrincipalExclusionResolver {
    /// Returns the excluded ids in ascending order.
    pub fn resolve(
        shares: &[Share],
        owner_id: Option<&PrincipalId>,
        editor_id: Option<&PrincipalId>,
    ) -> BTreeSet<PrincipalId> {
        shares
            .iter()
            .map(|s| s.principal_id().clone())
            .chain(owner_id.cloned())
            .chain(editor_id.cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::permission::PermissionLevel;
    use sharegate_entity::principal::PrincipalRef;
    use sharegate_entity::resource::ResourceRef;

    #[test]
    fn test_includes_owner_editor_and_listed() {
        let resource = ResourceRef::new("document", "doc-1");
        let shares = vec![
            Share::direct(PrincipalRef::user("carol"), resource.clone(), PermissionLevel::View),
            Share::inherited(PrincipalRef::user("alice"), resource, PermissionLevel::Edit),
        ];
        let owner = PrincipalId::new("olga");
        let editor = PrincipalId::new("eve");

        let excluded = PrincipalExclusionResolver::resolve(&shares, Some(&owner), Some(&editor));
        let ids: Vec<&str> = excluded.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "carol", "eve", "olga"]);
    }

    #[test]
    fn test_unset_actors_are_skipped() {
        assert!(PrincipalExclusionResolver::resolve(&[], None, None).is_empty());
    }
}
