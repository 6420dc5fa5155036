//! One share editing session for one resource.
//!
//! The session is a plain value: it owns the draft, the gate decision, and
//! the panel flags, and every operation is a method call. Rendering reads
//! [`ShareSession::panel`] and [`ShareSession::trigger`] after each change.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use sharegate_auth::{AuthorizationGate, CapabilityFlags, GateDecision};
use sharegate_core::config::SharingConfig;
use sharegate_core::error::AppError;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::principal::PrincipalSummary;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::{CommitRequest, Share};

use super::api::SharesApi;
use super::draft::{RemoveOutcome, ShareDraftStore};
use super::exclusion::PrincipalExclusionResolver;
use super::form::AddSharesForm;
use super::options::PermissionOptions;
use super::panel::{PanelMode, PanelSource, SharePanel, ShareTrigger};
use super::reconcile::{ReconciliationEngine, ReconciliationResult};
use super::record::{LabeledShare, ShareRecord};
use crate::directory::{DirectoryService, PrincipalQuery};

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CommitOutcome {
    /// Nothing changed; the shares API was not called.
    NoChange,
    /// The request was committed. `refreshed` is false when the follow-up
    /// fetch failed and the list was rebuilt from the request instead.
    Committed { request: CommitRequest, refreshed: bool },
}

/// Editing session state for one resource's share panel.
#[derive(Debug, Clone)]
pub struct ShareSession {
    record: ShareRecord,
    shares: Vec<Share>,
    labels: BTreeMap<PrincipalId, PrincipalSummary>,
    gate: AuthorizationGate,
    decision: GateDecision,
    draft: ShareDraftStore,
    options: PermissionOptions,
    avatar_limit: usize,
    reject_duplicates: bool,
    mode: PanelMode,
    open: bool,
    locked: bool,
}

impl ShareSession {
    /// Creates a closed session seeded from `record`.
    pub fn new(
        record: ShareRecord,
        flags: CapabilityFlags,
        config: &SharingConfig,
    ) -> Result<Self, AppError> {
        let options = PermissionOptions::from_config(config)?;
        let shares = record.plain_shares();
        let labels = record.labels();
        let gate = AuthorizationGate::new(flags);
        let decision = gate.evaluate(record.owner_id(), record.editor_id(), &shares);
        let draft = ShareDraftStore::open(&shares, record.editor_id());

        debug!(
            resource = %record.resource,
            shares = shares.len(),
            can_create = decision.can_create,
            can_edit = decision.can_edit,
            "Share session created"
        );

        Ok(Self {
            record,
            shares,
            labels,
            gate,
            decision,
            draft,
            options,
            avatar_limit: config.avatar_limit,
            reject_duplicates: config.reject_duplicates,
            mode: PanelMode::Listing,
            open: false,
            locked: false,
        })
    }

    pub fn resource(&self) -> &ResourceRef {
        &self.record.resource
    }

    pub fn record(&self) -> &ShareRecord {
        &self.record
    }

    /// Authoritative share list.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn decision(&self) -> &GateDecision {
        &self.decision
    }

    pub fn draft(&self) -> &ShareDraftStore {
        &self.draft
    }

    pub fn options(&self) -> &PermissionOptions {
        &self.options
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    /// The panel is shown while open or while a nested dropdown holds the
    /// lock.
    pub fn is_open(&self) -> bool {
        self.open || self.locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Open or close the panel.
    ///
    /// Ignored while locked. Closing throws away the draft and leaves
    /// adding mode.
    pub fn handle_open_change(&mut self, open: bool) {
        if self.locked {
            debug!(resource = %self.record.resource, open, "Panel locked, open change ignored");
            return;
        }
        self.open = open;
        if !open {
            self.reset();
        }
        debug!(resource = %self.record.resource, open, "Share panel toggled");
    }

    /// Holds the panel open while a nested dropdown is active.
    pub fn set_lock(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Switches the panel to the add-shares form.
    pub fn start_adding(&mut self) -> Result<(), AppError> {
        self.require_create()?;
        self.open = true;
        self.mode = PanelMode::Adding;
        Ok(())
    }

    /// Leaves the add-shares form without adding anything.
    pub fn cancel_adding(&mut self) {
        self.mode = PanelMode::Listing;
    }

    pub fn change_level(&mut self, index: usize, level: PermissionLevel) -> Result<(), AppError> {
        self.require_edit()?;
        self.options.ensure(level)?;
        self.draft.change_level(index, level)
    }

    pub fn revoke_inherited(&mut self, index: usize) -> Result<(), AppError> {
        self.require_edit()?;
        self.draft.revoke_inherited(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<RemoveOutcome, AppError> {
        self.require_edit()?;
        self.draft.remove(index)
    }

    /// Drops every edit without closing the panel.
    pub fn discard(&mut self) {
        self.draft.discard();
    }

    /// Principals the picker must not offer, from the current draft.
    pub fn excluded(&self) -> BTreeSet<PrincipalId> {
        PrincipalExclusionResolver::resolve(
            self.draft.working(),
            self.record.owner_id(),
            self.record.editor_id(),
        )
    }

    /// First-page picker query with the current exclusions.
    pub fn picker_query(
        &self,
        directory: &DirectoryService,
        text: &str,
    ) -> Result<PrincipalQuery, AppError> {
        directory.query(text, self.excluded())
    }

    /// What a submit would send right now.
    pub fn plan(&self) -> ReconciliationResult {
        ReconciliationEngine::reconcile(self.draft.baseline(), self.draft.working())
    }

    /// Commits the edited list.
    ///
    /// Needs the edit capability, except when the only pending changes are
    /// additions left over from a failed [`Self::submit_additions`], which
    /// the create capability may retry.
    pub async fn submit(&mut self, api: &dyn SharesApi) -> Result<CommitOutcome, AppError> {
        if !(self.decision.can_create && self.only_additions_pending()) {
            self.require_edit()?;
        }
        self.commit(api).await
    }

    /// Adds the form's principals to the draft and commits.
    ///
    /// When the commit fails the additions stay in the working list and
    /// the panel returns to listing mode, so the user can retry with
    /// [`Self::submit`].
    pub async fn submit_additions(
        &mut self,
        form: AddSharesForm,
        api: &dyn SharesApi,
    ) -> Result<CommitOutcome, AppError> {
        self.require_create()?;
        let picked = form.principals.clone();
        let new_shares = form.into_shares(&self.record.resource, &self.options)?;

        if self.reject_duplicates {
            let actors = [self.record.owner_id(), self.record.editor_id()];
            if let Some(share) = new_shares
                .iter()
                .find(|s| actors.contains(&Some(s.principal_id())))
            {
                return Err(AppError::conflict(format!(
                    "Principal '{}' is the owner or the current user",
                    share.principal_id()
                )));
            }
        }

        self.draft.add_shares(new_shares, self.reject_duplicates)?;
        self.labels
            .extend(picked.into_iter().map(|p| (p.id.clone(), p)));
        self.mode = PanelMode::Listing;
        self.commit(api).await
    }

    /// Replaces the authoritative list and reseeds the draft.
    pub fn refresh(&mut self, shares: Vec<Share>) {
        let shares: Vec<Share> = shares
            .into_iter()
            .filter(|s| s.resource.same_resource(&self.record.resource))
            .collect();

        self.record.shares = shares
            .iter()
            .map(|s| LabeledShare::new(s.clone(), self.labels.get(s.principal_id()).cloned()))
            .collect();
        self.decision = self
            .gate
            .evaluate(self.record.owner_id(), self.record.editor_id(), &shares);
        self.draft = ShareDraftStore::open(&shares, self.record.editor_id());
        self.shares = shares;

        debug!(
            resource = %self.record.resource,
            shares = self.shares.len(),
            can_edit = self.decision.can_edit,
            "Share session refreshed"
        );
    }

    /// Render-ready panel.
    pub fn panel(&self) -> SharePanel {
        SharePanel::build(
            PanelSource {
                owner: self.record.owner.as_ref(),
                editor: self.record.editor.as_ref(),
                shares: &self.shares,
                working: self.draft.working(),
                labels: &self.labels,
            },
            &self.decision,
            self.mode,
            &self.options,
        )
    }

    /// Collapsed cell content.
    pub fn trigger(&self) -> ShareTrigger {
        ShareTrigger::build(&self.record.shares, self.decision.can_create, self.avatar_limit)
    }

    async fn commit(&mut self, api: &dyn SharesApi) -> Result<CommitOutcome, AppError> {
        let result = self.plan();
        if result.is_noop() {
            debug!(resource = %self.record.resource, "No share changes, skipping commit");
            self.close();
            return Ok(CommitOutcome::NoChange);
        }

        let request = result.to_request(&self.record.resource);
        if let Err(e) = api.commit(&request).await {
            warn!(
                resource = %self.record.resource,
                upserts = request.shares.len(),
                revokes = request.revokes.len(),
                error = %e,
                "Share commit failed, keeping draft"
            );
            return Err(e);
        }

        info!(
            resource = %self.record.resource,
            upserts = request.shares.len(),
            revokes = request.revokes.len(),
            "Shares committed"
        );

        let refreshed = match api
            .fetch_shares(std::slice::from_ref(&self.record.resource))
            .await
        {
            Ok(shares) => {
                self.refresh(shares);
                true
            }
            Err(e) => {
                warn!(resource = %self.record.resource, error = %e, "Share refresh after commit failed, applying request locally");
                let applied = request.apply_to(&self.shares);
                self.refresh(applied);
                false
            }
        };

        self.close();
        Ok(CommitOutcome::Committed { request, refreshed })
    }

    /// Every baseline row is still in working, unchanged, and working has
    /// rows on top.
    fn only_additions_pending(&self) -> bool {
        let baseline = self.draft.baseline();
        let working = self.draft.working();
        working.len() > baseline.len() && baseline.iter().all(|row| working.contains(row))
    }

    fn close(&mut self) {
        self.open = false;
        self.locked = false;
        self.reset();
    }

    fn reset(&mut self) {
        self.draft.discard();
        self.mode = PanelMode::Listing;
    }

    fn require_create(&self) -> Result<(), AppError> {
        if self.decision.can_create {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Not allowed to add shares on {}",
                self.record.resource
            )))
        }
    }

    fn require_edit(&self) -> Result<(), AppError> {
        if self.decision.can_edit {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Not allowed to change shares on {}",
                self.record.resource
            )))
        }
    }
}
