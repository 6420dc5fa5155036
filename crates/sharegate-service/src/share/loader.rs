//! Batch loading of shares and labels for a page of resources.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sharegate_core::error::AppError;
use sharegate_core::traits::Authorizer;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::SharingAction;
use sharegate_entity::principal::{PrincipalKind, PrincipalSummary};
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::Share;

use super::api::SharesApi;
use super::record::{LabeledShare, ShareRecord};
use crate::directory::{LabelRequest, PrincipalDirectory};

/// A listed resource before shares are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub resource: ResourceRef,
    #[serde(default)]
    pub owner_id: Option<PrincipalId>,
}

impl RecordInput {
    pub fn new(resource: ResourceRef, owner_id: Option<PrincipalId>) -> Self {
        Self { resource, owner_id }
    }
}

/// Attaches shares, owner, and editor labels to a page of records with
/// one shares call and one label call.
#[derive(Debug, Clone)]
pub struct ShareLoader {
    api: Arc<dyn SharesApi>,
    directory: Arc<dyn PrincipalDirectory>,
    authorizer: Arc<dyn Authorizer>,
}

impl ShareLoader {
    pub fn new(
        api: Arc<dyn SharesApi>,
        directory: Arc<dyn PrincipalDirectory>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            api,
            directory,
            authorizer,
        }
    }

    /// Loads the page.
    ///
    /// Shares are only fetched with the sharing-search grant. Without the
    /// label-read grant the records come back as they were passed in, with
    /// no shares, owner, or editor attached.
    pub async fn load(
        &self,
        records: Vec<RecordInput>,
        current_user: Option<&PrincipalId>,
    ) -> Result<Vec<ShareRecord>, AppError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let shares = if self.authorizer.has_auth(SharingAction::SharingSearch.as_str()) {
            let resources: Vec<ResourceRef> = records.iter().map(|r| r.resource.clone()).collect();
            self.api.fetch_shares(&resources).await?
        } else {
            Vec::new()
        };

        if !self.authorizer.has_auth(SharingAction::EntityLabelRead.as_str()) {
            debug!(records = records.len(), "Label read not granted, returning bare records");
            return Ok(records.into_iter().map(bare_record).collect());
        }

        let requests = label_requests(&records, &shares, current_user);
        let labels: HashMap<PrincipalId, PrincipalSummary> = if requests.is_empty() {
            HashMap::new()
        } else {
            self.directory
                .labels(&requests)
                .await?
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect()
        };

        let editor = current_user.and_then(|id| labels.get(id)).cloned();
        let loaded: Vec<ShareRecord> = records
            .into_iter()
            .map(|input| {
                let record_shares = shares
                    .iter()
                    .filter(|s| s.resource.same_resource(&input.resource))
                    .map(|s| LabeledShare::new(s.clone(), labels.get(s.principal_id()).cloned()))
                    .collect();
                ShareRecord {
                    owner: input.owner_id.as_ref().and_then(|id| labels.get(id)).cloned(),
                    owner_id: input.owner_id,
                    editor: editor.clone(),
                    resource: input.resource,
                    shares: record_shares,
                }
            })
            .collect();

        info!(
            records = loaded.len(),
            shares = shares.len(),
            labels = labels.len(),
            "Share records loaded"
        );
        Ok(loaded)
    }
}

fn bare_record(input: RecordInput) -> ShareRecord {
    ShareRecord {
        owner_id: input.owner_id,
        ..ShareRecord::new(input.resource)
    }
}

/// Groups every id needing a label by principal kind, without repeats.
fn label_requests(
    records: &[RecordInput],
    shares: &[Share],
    current_user: Option<&PrincipalId>,
) -> Vec<LabelRequest> {
    let mut grouped: BTreeMap<PrincipalKind, BTreeSet<PrincipalId>> = BTreeMap::new();
    let users = records
        .iter()
        .filter_map(|r| r.owner_id.clone())
        .chain(current_user.cloned());
    grouped.entry(PrincipalKind::User).or_default().extend(users);
    for share in shares {
        grouped
            .entry(share.principal.kind)
            .or_default()
            .insert(share.principal_id().clone());
    }

    grouped
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(kind, ids)| LabelRequest {
            kind,
            ids: ids.into_iter().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::permission::PermissionLevel;
    use sharegate_entity::principal::PrincipalRef;

    #[test]
    fn test_label_requests_are_unique() {
        let resource = ResourceRef::new("datasource", "ds-1");
        let records = vec![
            RecordInput::new(resource.clone(), Some(PrincipalId::new("olga"))),
            RecordInput::new(ResourceRef::new("datasource", "ds-2"), Some(PrincipalId::new("olga"))),
        ];
        let shares = vec![
            Share::direct(PrincipalRef::user("bob"), resource.clone(), PermissionLevel::View),
            Share::direct(PrincipalRef::user("eve"), resource, PermissionLevel::Share),
        ];

        let requests = label_requests(&records, &shares, Some(&PrincipalId::new("eve")));
        assert_eq!(requests.len(), 1);
        let ids: Vec<&str> = requests[0].ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["bob", "eve", "olga"]);
    }

    #[test]
    fn test_no_ids_no_requests() {
        let records = vec![RecordInput::new(ResourceRef::new("document", "doc-1"), None)];
        assert!(label_requests(&records, &[], None).is_empty());
    }
}
