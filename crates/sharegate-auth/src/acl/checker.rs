//! Share-list lookups for the current actor.

use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::principal::PrincipalSummary;
use sharegate_entity::share::Share;

/// Returns the first share granted to `principal_id`, if any.
pub fn entry_of<'a>(principal_id: &PrincipalId, shares: &'a [Share]) -> Option<&'a Share> {
    shares.iter().find(|s| s.principal_id() == principal_id)
}

/// Returns the level granted to `principal_id` by `shares`.
///
/// A principal without an entry holds [`PermissionLevel::None`]. When the
/// list holds several entries for the principal the first one wins.
pub fn level_of(principal_id: Option<&PrincipalId>, shares: &[Share]) -> PermissionLevel {
    principal_id
        .and_then(|id| entry_of(id, shares))
        .map(|s| s.permission)
        .unwrap_or(PermissionLevel::None)
}

/// Whether `owner` is set and equal to `editor`.
pub fn is_owner(owner_id: Option<&PrincipalId>, editor_id: Option<&PrincipalId>) -> bool {
    matches!((owner_id, editor_id), (Some(owner), Some(editor)) if owner == editor)
}

/// Record-level access helpers for list views.
///
/// A record is a resource row as listed to the current actor: its owner,
/// the actor (editor) and the authoritative share list.
#[derive(Debug, Clone, Copy)]
pub struct RecordAccess<'a> {
    /// Resource owner, if recorded.
    pub owner: Option<&'a PrincipalSummary>,
    /// Current actor, if resolved.
    pub editor: Option<&'a PrincipalSummary>,
    /// Authoritative share list.
    pub shares: &'a [Share],
}

impl<'a> RecordAccess<'a> {
    /// Creates a new record view.
    pub fn new(
        owner: Option<&'a PrincipalSummary>,
        editor: Option<&'a PrincipalSummary>,
        shares: &'a [Share],
    ) -> Self {
        Self {
            owner,
            editor,
            shares,
        }
    }

    fn owner_id(&self) -> Option<&'a PrincipalId> {
        self.owner.map(|o| &o.id)
    }

    fn editor_id(&self) -> Option<&'a PrincipalId> {
        self.editor.map(|e| &e.id)
    }

    /// The actor's own share level on the record.
    pub fn editor_level(&self) -> PermissionLevel {
        level_of(self.editor_id(), self.shares)
    }

    /// The actor owns the record.
    pub fn is_editor_owner(&self) -> bool {
        is_owner(self.owner_id(), self.editor_id())
    }

    /// The actor may edit the record's content.
    pub fn has_edit(&self) -> bool {
        self.is_editor_owner() || self.editor_level().at_least(PermissionLevel::Edit)
    }

    /// The actor may view the record.
    pub fn has_view(&self) -> bool {
        self.is_editor_owner() || self.editor_level().at_least(PermissionLevel::View)
    }

    /// The record has an owner other than the actor, i.e. it reached the
    /// actor through sharing.
    pub fn is_resource_share(&self) -> bool {
        match self.owner {
            Some(owner) => self.editor_id() != Some(&owner.id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::principal::PrincipalRef;
    use sharegate_entity::resource::ResourceRef;

    fn share(id: &str, level: PermissionLevel) -> Share {
        Share::direct(PrincipalRef::user(id), ResourceRef::new("document", "doc-1"), level)
    }

    #[test]
    fn test_level_of_missing_is_none() {
        let shares = vec![share("alice", PermissionLevel::Edit)];
        assert_eq!(
            level_of(Some(&PrincipalId::new("bob")), &shares),
            PermissionLevel::None
        );
        assert_eq!(level_of(None, &shares), PermissionLevel::None);
        assert_eq!(
            level_of(Some(&PrincipalId::new("alice")), &shares),
            PermissionLevel::Edit
        );
    }

    #[test]
    fn test_first_entry_wins() {
        let shares = vec![
            share("alice", PermissionLevel::View),
            share("alice", PermissionLevel::All),
        ];
        assert_eq!(
            level_of(Some(&PrincipalId::new("alice")), &shares),
            PermissionLevel::View
        );
    }

    #[test]
    fn test_record_helpers() {
        let owner = PrincipalSummary::user("olga", "Olga");
        let editor = PrincipalSummary::user("eve", "Eve");
        let shares = vec![share("eve", PermissionLevel::Comment)];

        let access = RecordAccess::new(Some(&owner), Some(&editor), &shares);
        assert!(!access.is_editor_owner());
        assert!(access.has_view());
        assert!(!access.has_edit());
        assert!(access.is_resource_share());

        let own = RecordAccess::new(Some(&owner), Some(&owner), &[]);
        assert!(own.is_editor_owner());
        assert!(own.has_edit());
        assert!(!own.is_resource_share());

        let orphan = RecordAccess::new(None, Some(&editor), &[]);
        assert!(!orphan.is_editor_owner());
        assert!(!orphan.has_view());
        assert!(!orphan.is_resource_share());
    }
}
