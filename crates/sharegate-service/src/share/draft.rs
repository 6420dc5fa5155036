//! Working copy of a resource's share list during one editing session.

use std::collections::HashSet;

use tracing::{debug, warn};

use sharegate_core::error::AppError;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::share::Share;

/// Result of asking the draft to delete a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The row was deleted from the working list.
    Removed(Share),
    /// The row is an inherited grant that has not been flagged for
    /// removal; it stays present and unchanged.
    RefusedInherited,
}

/// Baseline snapshot plus the mutable working list.
///
/// The baseline is the authoritative list as it was when the session
/// opened, minus the current actor's own row. It never changes until the
/// draft is reopened.
#[derive(Debug, Clone, Default)]
pub struct ShareDraftStore {
    baseline: Vec<Share>,
    working: Vec<Share>,
}

impl ShareDraftStore {
    /// Seeds a draft from the authoritative list.
    ///
    /// The editor's own row is shown separately and never edited, so it
    /// is left out of both lists.
    pub fn open(shares: &[Share], editor_id: Option<&PrincipalId>) -> Self {
        let baseline: Vec<Share> = shares
            .iter()
            .filter(|s| Some(s.principal_id()) != editor_id)
            .cloned()
            .collect();
        debug!(rows = baseline.len(), "Share draft opened");
        Self {
            working: baseline.clone(),
            baseline,
        }
    }

    /// Snapshot the draft was opened from.
    pub fn baseline(&self) -> &[Share] {
        &self.baseline
    }

    /// Current edited list.
    pub fn working(&self) -> &[Share] {
        &self.working
    }

    /// Whether the working list differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        !crate::share::reconcile::same_contents(&self.baseline, &self.working)
    }

    /// Appends new direct shares after the existing rows.
    ///
    /// With `reject_duplicates` set, a principal already present in the
    /// working list or repeated inside `new_shares` fails the whole batch
    /// with a conflict and leaves the draft untouched.
    pub fn add_shares(
        &mut self,
        new_shares: Vec<Share>,
        reject_duplicates: bool,
    ) -> Result<usize, AppError> {
        if let Some(share) = new_shares.iter().find(|s| s.is_inherited()) {
            return Err(AppError::validation(format!(
                "New share for '{}' must be a direct grant",
                share.principal_id()
            )));
        }

        if reject_duplicates {
            let mut seen: HashSet<&PrincipalId> =
                self.working.iter().map(|s| s.principal_id()).collect();
            for share in &new_shares {
                if !seen.insert(share.principal_id()) {
                    return Err(AppError::conflict(format!(
                        "Principal '{}' already has a share on this resource",
                        share.principal_id()
                    )));
                }
            }
        }

        let added = new_shares.len();
        self.working.extend(new_shares);
        debug!(added, rows = self.working.len(), "Shares added to draft");
        Ok(added)
    }

    /// Sets the level of one row.
    ///
    /// Changing an inherited row promotes it to a direct override of the
    /// ancestor's grant, so the row is flagged for removal of its inherited
    /// marker. `origin` is left as it was.
    pub fn change_level(&mut self, index: usize, level: PermissionLevel) -> Result<(), AppError> {
        let share = self.row_mut(index)?;
        share.permission = level;
        if share.is_inherited() {
            share.marked_for_removal = true;
        }
        debug!(index, principal_id = %share.principal_id(), level = %level, "Share level changed");
        Ok(())
    }

    /// Flags an inherited row so that it may be removed or overridden.
    pub fn revoke_inherited(&mut self, index: usize) -> Result<(), AppError> {
        let share = self.row_mut(index)?;
        if !share.is_inherited() {
            return Err(AppError::validation(format!(
                "Share for '{}' is not inherited",
                share.principal_id()
            )));
        }
        share.marked_for_removal = true;
        debug!(index, principal_id = %share.principal_id(), "Inherited share flagged for removal");
        Ok(())
    }

    /// Deletes one row unless it is a locked inherited grant.
    pub fn remove(&mut self, index: usize) -> Result<RemoveOutcome, AppError> {
        let share = self.row(index)?;
        if share.is_locked_inherited() {
            warn!(
                index,
                principal_id = %share.principal_id(),
                "Refused to remove inherited share"
            );
            return Ok(RemoveOutcome::RefusedInherited);
        }
        let removed = self.working.remove(index);
        debug!(index, principal_id = %removed.principal_id(), "Share removed from draft");
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Drops every edit and restores the baseline.
    pub fn discard(&mut self) {
        self.working = self.baseline.clone();
        debug!(rows = self.working.len(), "Share draft discarded");
    }

    fn row(&self, index: usize) -> Result<&Share, AppError> {
        let len = self.working.len();
        self.working
            .get(index)
            .ok_or_else(|| AppError::not_found(format!("No share row at index {index} (rows: {len})")))
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut Share, AppError> {
        let len = self.working.len();
        self.working
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("No share row at index {index} (rows: {len})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_core::error::ErrorKind;
    use sharegate_entity::principal::PrincipalRef;
    use sharegate_entity::resource::ResourceRef;

    fn doc() -> ResourceRef {
        ResourceRef::new("document", "doc-1")
    }

    fn direct(id: &str, level: PermissionLevel) -> Share {
        Share::direct(PrincipalRef::user(id), doc(), level)
    }

    fn inherited(id: &str, level: PermissionLevel) -> Share {
        Share::inherited(PrincipalRef::user(id), doc(), level)
    }

    #[test]
    fn test_open_drops_editor_row() {
        let shares = vec![direct("eve", PermissionLevel::Share), direct("bob", PermissionLevel::View)];
        let draft = ShareDraftStore::open(&shares, Some(&PrincipalId::new("eve")));
        assert_eq!(draft.baseline().len(), 1);
        assert_eq!(draft.working()[0].principal_id().as_str(), "bob");
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut draft = ShareDraftStore::open(&[direct("bob", PermissionLevel::View)], None);

        let err = draft
            .add_shares(vec![direct("bob", PermissionLevel::Edit)], true)
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        let err = draft
            .add_shares(
                vec![direct("dan", PermissionLevel::Edit), direct("dan", PermissionLevel::View)],
                true,
            )
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(draft.working().len(), 1);

        assert_eq!(draft.add_shares(vec![direct("dan", PermissionLevel::Edit)], true).unwrap(), 1);
        assert_eq!(draft.working()[1].principal_id().as_str(), "dan");
    }

    #[test]
    fn test_add_allows_duplicates_when_relaxed() {
        let mut draft = ShareDraftStore::open(&[direct("bob", PermissionLevel::View)], None);
        draft.add_shares(vec![direct("bob", PermissionLevel::Edit)], false).unwrap();
        assert_eq!(draft.working().len(), 2);
    }

    #[test]
    fn test_add_rejects_inherited_input() {
        let mut draft = ShareDraftStore::default();
        let err = draft
            .add_shares(vec![inherited("bob", PermissionLevel::View)], true)
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_change_level_promotes_inherited() {
        let mut draft = ShareDraftStore::open(&[inherited("alice", PermissionLevel::View)], None);
        draft.change_level(0, PermissionLevel::Edit).unwrap();
        let row = &draft.working()[0];
        assert_eq!(row.permission, PermissionLevel::Edit);
        assert!(row.is_inherited());
        assert!(row.marked_for_removal);
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_remove_refuses_locked_inherited() {
        let mut draft = ShareDraftStore::open(&[inherited("alice", PermissionLevel::View)], None);
        assert_eq!(draft.remove(0).unwrap(), RemoveOutcome::RefusedInherited);
        assert_eq!(draft.working(), draft.baseline());

        draft.revoke_inherited(0).unwrap();
        assert!(matches!(draft.remove(0).unwrap(), RemoveOutcome::Removed(_)));
        assert!(draft.working().is_empty());
    }

    #[test]
    fn test_revoke_inherited_rejects_direct() {
        let mut draft = ShareDraftStore::open(&[direct("bob", PermissionLevel::View)], None);
        assert!(draft.revoke_inherited(0).unwrap_err().is(ErrorKind::Validation));
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let mut draft = ShareDraftStore::default();
        assert!(draft.change_level(3, PermissionLevel::View).unwrap_err().is(ErrorKind::NotFound));
        assert!(draft.remove(0).unwrap_err().is(ErrorKind::NotFound));
        assert!(draft.revoke_inherited(0).unwrap_err().is(ErrorKind::NotFound));
    }

    #[test]
    fn test_discard_restores_baseline() {
        let mut draft = ShareDraftStore::open(&[direct("bob", PermissionLevel::View)], None);
        draft.remove(0).unwrap();
        draft.add_shares(vec![direct("dan", PermissionLevel::Edit)], true).unwrap();
        draft.discard();
        assert_eq!(draft.working(), draft.baseline());
    }
}
