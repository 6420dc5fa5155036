//! Render-ready view of a share editing session.
//!
//! Nothing here mutates state; the panel is rebuilt from the session after
//! every change.

use std::collections::BTreeMap;

use serde::Serialize;

use sharegate_auth::GateDecision;
use sharegate_auth::acl::checker::{entry_of, is_owner};
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::principal::{PrincipalRef, PrincipalSummary};
use sharegate_entity::share::Share;

use super::options::PermissionOptions;
use super::record::LabeledShare;

/// Whether the panel lists shares or shows the add-shares form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    #[default]
    Listing,
    Adding,
}

/// Owner or editor row, shown above the editable rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRow {
    pub principal: PrincipalSummary,
    /// The row is the current actor.
    pub is_you: bool,
    /// Level held through a share entry. Owners carry none.
    pub level: Option<PermissionLevel>,
    pub inherited: bool,
}

/// One editable row backed by the draft's working list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRow {
    /// Position in the working list, used for edit calls.
    pub index: usize,
    pub principal: PrincipalRef,
    pub label: Option<PrincipalSummary>,
    pub level: PermissionLevel,
    pub inherited: bool,
    /// Inherited row whose level was set on this resource.
    pub overridden: bool,
    pub can_change_level: bool,
    pub can_delete: bool,
    /// Locked inherited row the actor may detach with `revoke_inherited`.
    pub can_revoke_inherited: bool,
}

/// Which footer buttons to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelFooter {
    pub show_add: bool,
    pub show_confirm: bool,
}

/// Everything the share panel renders.
#[derive(Debug, Clone, Serialize)]
pub struct SharePanel {
    pub mode: PanelMode,
    pub owner: Option<ActorRow>,
    pub editor: Option<ActorRow>,
    pub rows: Vec<ShareRow>,
    pub footer: PanelFooter,
    pub options: PermissionOptions,
}

/// Inputs the panel is built from.
#[derive(Debug, Clone, Copy)]
pub struct PanelSource<'a> {
    pub owner: Option<&'a PrincipalSummary>,
    pub editor: Option<&'a PrincipalSummary>,
    /// Authoritative list, used for the editor row.
    pub shares: &'a [Share],
    /// Draft working list, used for the editable rows.
    pub working: &'a [Share],
    pub labels: &'a BTreeMap<PrincipalId, PrincipalSummary>,
}

impl SharePanel {
    pub fn build(
        source: PanelSource<'_>,
        gate: &GateDecision,
        mode: PanelMode,
        options: &PermissionOptions,
    ) -> Self {
        let owner_id = source.owner.map(|o| &o.id);
        let editor_id = source.editor.map(|e| &e.id);
        let editor_is_owner = is_owner(owner_id, editor_id);

        let owner = source.owner.map(|principal| ActorRow {
            principal: principal.clone(),
            is_you: editor_is_owner,
            level: None,
            inherited: false,
        });

        let editor = source
            .editor
            .filter(|_| !editor_is_owner)
            .and_then(|principal| {
                entry_of(&principal.id, source.shares).map(|entry| ActorRow {
                    principal: principal.clone(),
                    is_you: true,
                    level: Some(entry.permission),
                    inherited: entry.is_inherited(),
                })
            });

        let rows = source
            .working
            .iter()
            .enumerate()
            .map(|(index, share)| ShareRow {
                index,
                principal: share.principal.clone(),
                label: source.labels.get(share.principal_id()).cloned(),
                level: share.permission,
                inherited: share.is_inherited(),
                overridden: share.is_inherited() && share.marked_for_removal,
                can_change_level: gate.can_edit,
                can_delete: gate.can_edit && !share.is_locked_inherited(),
                can_revoke_inherited: gate.can_edit && share.is_locked_inherited(),
            })
            .collect();

        Self {
            mode,
            owner,
            editor,
            rows,
            footer: PanelFooter {
                show_add: gate.can_create,
                show_confirm: gate.can_edit,
            },
            options: options.clone(),
        }
    }
}

/// One avatar of the collapsed trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarItem {
    pub principal: PrincipalRef,
    pub label: Option<PrincipalSummary>,
}

/// What the collapsed share cell shows before the panel opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ShareTrigger {
    /// No shares and nothing the actor could add.
    Placeholder,
    /// No shares yet; opening the panel lets the actor add some.
    AddLink,
    /// Up to `limit` avatars plus how many were left out.
    Avatars { shown: Vec<AvatarItem>, overflow: usize },
}

impl ShareTrigger {
    pub fn build(shares: &[LabeledShare], can_create: bool, limit: usize) -> Self {
        if shares.is_empty() {
            return if can_create {
                Self::AddLink
            } else {
                Self::Placeholder
            };
        }
        let shown = shares
            .iter()
            .take(limit)
            .map(|s| AvatarItem {
                principal: s.share.principal.clone(),
                label: s.entity.clone(),
            })
            .collect();
        Self::Avatars {
            shown,
            overflow: shares.len().saturating_sub(limit),
        }
    }
}
