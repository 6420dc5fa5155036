//! Turns a baseline/working pair into the minimal commit request.

use std::collections::HashSet;

use serde::Serialize;

use sharegate_core::types::PrincipalId;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::{CommitRequest, Share, ShareRevoke, ShareUpsert};

/// Shares to write and shares to delete for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    /// Rows owned by this resource, written with their current level.
    pub upserts: Vec<Share>,
    /// Baseline rows whose principal disappeared from the working list.
    pub revokes: Vec<Share>,
}

impl ReconciliationResult {
    /// Nothing to write.
    pub fn is_noop(&self) -> bool {
        self.upserts.is_empty() && self.revokes.is_empty()
    }

    /// Maps the result onto the wire request for `resource`.
    pub fn to_request(&self, resource: &ResourceRef) -> CommitRequest {
        CommitRequest::new(
            resource,
            self.upserts.iter().map(ShareUpsert::from).collect(),
            self.revokes.iter().map(ShareRevoke::from).collect(),
        )
    }
}

/// Computes upserts and revokes from a draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Reconciles `working` against `baseline`.
    ///
    /// Unchanged contents yield an empty result regardless of row order.
    /// Every row owned by this resource is upserted, not only the edited
    /// ones; the backend treats a repeated upsert as idempotent. Locked
    /// inherited rows are never written.
    pub fn reconcile(baseline: &[Share], working: &[Share]) -> ReconciliationResult {
        if same_contents(baseline, working) {
            return ReconciliationResult::default();
        }

        let kept: HashSet<&PrincipalId> = working.iter().map(|s| s.principal_id()).collect();
        let revokes = baseline
            .iter()
            .filter(|s| !kept.contains(s.principal_id()))
            .cloned()
            .collect();
        let upserts = working
            .iter()
            .filter(|s| s.is_owned_here())
            .cloned()
            .collect();

        ReconciliationResult { upserts, revokes }
    }
}

/// Order-insensitive multiset comparison of two share lists.
pub(crate) fn same_contents(a: &[Share], b: &[Share]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&Share> = a.iter().collect();
    let mut b: Vec<&Share> = b.iter().collect();
    a.sort();
    b.sort();
    a == b
}
