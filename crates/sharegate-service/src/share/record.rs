//! A resource row as listed to the current actor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sharegate_auth::RecordAccess;
use sharegate_core::types::PrincipalId;
use sharegate_entity::principal::PrincipalSummary;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::Share;

/// A share together with its principal's display label, when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledShare {
    #[serde(flatten)]
    pub share: Share,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<PrincipalSummary>,
}

impl LabeledShare {
    pub fn new(share: Share, entity: Option<PrincipalSummary>) -> Self {
        Self { share, entity }
    }
}

impl From<Share> for LabeledShare {
    fn from(share: Share) -> Self {
        Self::new(share, None)
    }
}

/// Resource, its owner, the current actor, and the authoritative shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub resource: ResourceRef,
    /// Owner id as stored on the resource, even when no label resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<PrincipalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PrincipalSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<PrincipalSummary>,
    #[serde(default)]
    pub shares: Vec<LabeledShare>,
}

impl ShareRecord {
    /// Creates a record with no owner, editor, or shares.
    pub fn new(resource: ResourceRef) -> Self {
        Self {
            resource,
            owner_id: None,
            owner: None,
            editor: None,
            shares: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: PrincipalSummary) -> Self {
        self.owner_id = Some(owner.id.clone());
        self.owner = Some(owner);
        self
    }

    pub fn with_editor(mut self, editor: PrincipalSummary) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_shares(mut self, shares: impl IntoIterator<Item = LabeledShare>) -> Self {
        self.shares = shares.into_iter().collect();
        self
    }

    /// Owner id, falling back to the resolved owner summary.
    pub fn owner_id(&self) -> Option<&PrincipalId> {
        self.owner_id.as_ref().or(self.owner.as_ref().map(|o| &o.id))
    }

    pub fn editor_id(&self) -> Option<&PrincipalId> {
        self.editor.as_ref().map(|e| &e.id)
    }

    /// The bare share list.
    pub fn plain_shares(&self) -> Vec<Share> {
        self.shares.iter().map(|s| s.share.clone()).collect()
    }

    /// Every resolved label, keyed by principal id.
    pub fn labels(&self) -> BTreeMap<PrincipalId, PrincipalSummary> {
        self.shares
            .iter()
            .filter_map(|s| s.entity.clone())
            .chain(self.owner.clone())
            .chain(self.editor.clone())
            .map(|p| (p.id.clone(), p))
            .collect()
    }

    /// Record-level access helpers over `shares`.
    pub fn access<'a>(&'a self, shares: &'a [Share]) -> RecordAccess<'a> {
        RecordAccess::new(self.owner.as_ref(), self.editor.as_ref(), shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::permission::PermissionLevel;
    use sharegate_entity::principal::PrincipalRef;

    #[test]
    fn test_labels_and_access() {
        let resource = ResourceRef::new("datasource", "ds-1");
        let bob = PrincipalSummary::user("bob", "Bob");
        let record = ShareRecord::new(resource.clone())
            .with_owner(PrincipalSummary::user("olga", "Olga"))
            .with_editor(PrincipalSummary::user("eve", "Eve"))
            .with_shares([
                LabeledShare::new(
                    Share::direct(bob.principal_ref(), resource.clone(), PermissionLevel::View),
                    Some(bob.clone()),
                ),
                Share::direct(PrincipalRef::user("eve"), resource, PermissionLevel::Edit).into(),
            ]);

        let labels = record.labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[&PrincipalId::new("bob")].title, "Bob");

        let shares = record.plain_shares();
        let access = record.access(&shares);
        assert!(access.has_edit());
        assert!(!access.is_editor_owner());
        assert_eq!(record.owner_id().map(|id| id.as_str()), Some("olga"));
    }

    #[test]
    fn test_labeled_share_is_flat() {
        let share = Share::direct(
            PrincipalRef::user("bob"),
            ResourceRef::new("document", "doc-1"),
            PermissionLevel::Comment,
        );
        let json = serde_json::to_value(LabeledShare::new(share, Some(PrincipalSummary::user("bob", "Bob")))).unwrap();
        assert_eq!(json["permission"], 2);
        assert_eq!(json["entity"]["title"], "Bob");
    }
}
