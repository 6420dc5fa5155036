//! In-memory shares backend and principal directory.
//!
//! Used by the CLI and by tests. Grants are kept per resource; inherited
//! grants are derived on read from a registered parent chain. Revoking an
//! inherited grant masks it on the child without touching the ancestor.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use sharegate_core::error::AppError;
use sharegate_core::events::{DomainEvent, ShareEvent};
use sharegate_core::result::AppResult;
use sharegate_core::types::{PageResponse, PrincipalId, ResourceId};
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::principal::{PrincipalRef, PrincipalSummary};
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::{CommitRequest, Share};

use crate::directory::{LabelRequest, PrincipalDirectory, PrincipalQuery};
use crate::share::api::SharesApi;

type ResourceKey = (String, ResourceId);

fn key_of(resource: &ResourceRef) -> ResourceKey {
    (resource.kind.clone(), resource.id.clone())
}

/// Shares backend holding direct grants in memory.
#[derive(Debug, Default)]
pub struct MemorySharesBackend {
    /// Resource → direct grants, in insertion order.
    grants: DashMap<ResourceKey, Vec<Share>>,
    /// Child → parent resource.
    parents: DashMap<ResourceKey, ResourceKey>,
    /// Resource → principals whose inherited grants were revoked here.
    masked: DashMap<ResourceKey, HashSet<PrincipalId>>,
    /// Audit trail of applied commits.
    events: RwLock<Vec<DomainEvent>>,
    fail_next_commit: AtomicBool,
    commits: AtomicUsize,
    next_id: AtomicU64,
}

impl MemorySharesBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a direct grant, replacing any grant the principal already
    /// holds on the same resource.
    pub fn grant(&self, principal: PrincipalRef, resource: &ResourceRef, permission: PermissionLevel) {
        self.unmask(resource, &principal.id);
        let mut entry = self.grants.entry(key_of(resource)).or_default();
        match entry.iter_mut().find(|g| g.principal.id == principal.id) {
            Some(existing) => existing.permission = permission,
            None => {
                let share = Share::direct(principal, resource.clone(), permission).with_id(self.next_share_id());
                entry.push(share);
            }
        }
    }

    /// Registers `parent` as the resource `child` inherits grants from.
    pub fn set_parent(&self, child: &ResourceRef, parent: &ResourceRef) {
        self.parents.insert(key_of(child), key_of(parent));
    }

    /// Makes the next commit fail without applying anything.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Number of commit calls received, failed ones included.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Direct grants stored on `resource`.
    pub fn direct_grants(&self, resource: &ResourceRef) -> Vec<Share> {
        self.grants
            .get(&key_of(resource))
            .map(|g| g.value().clone())
            .unwrap_or_default()
    }

    /// Principals whose inherited grants are masked on `resource`.
    pub fn masked_principals(&self, resource: &ResourceRef) -> Vec<PrincipalId> {
        let mut ids: Vec<PrincipalId> = self
            .masked
            .get(&key_of(resource))
            .map(|m| m.value().iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Snapshot of recorded events.
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    fn unmask(&self, resource: &ResourceRef, principal_id: &PrincipalId) {
        if let Some(mut masked) = self.masked.get_mut(&key_of(resource)) {
            masked.remove(principal_id);
        }
    }

    fn next_share_id(&self) -> String {
        format!("sh-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Direct grants plus grants inherited from the nearest ancestor that
    /// has one for each principal.
    fn resolve(&self, resource: &ResourceRef) -> Vec<Share> {
        let key = key_of(resource);
        let mut resolved: Vec<Share> = self
            .grants
            .get(&key)
            .map(|g| {
                g.iter()
                    .map(|s| Share {
                        resource: resource.clone(),
                        ..s.clone()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut seen: HashSet<PrincipalId> = resolved.iter().map(|s| s.principal_id().clone()).collect();
        if let Some(masked) = self.masked.get(&key) {
            seen.extend(masked.value().iter().cloned());
        }
        let mut visited = HashSet::from([key.clone()]);
        let mut current = self.parents.get(&key).map(|p| p.value().clone());

        while let Some(ancestor) = current {
            if !visited.insert(ancestor.clone()) {
                warn!(resource = %resource, "Parent chain has a cycle, stopping inheritance walk");
                break;
            }
            if let Some(grants) = self.grants.get(&ancestor) {
                for grant in grants.iter() {
                    if seen.insert(grant.principal_id().clone()) {
                        let mut inherited =
                            Share::inherited(grant.principal.clone(), resource.clone(), grant.permission);
                        inherited.id = grant.id.clone();
                        resolved.push(inherited);
                    }
                }
            }
            current = self.parents.get(&ancestor).map(|p| p.value().clone());
        }
        resolved
    }
}

#[async_trait]
impl SharesApi for MemorySharesBackend {
    async fn fetch_shares(&self, resources: &[ResourceRef]) -> AppResult<Vec<Share>> {
        let shares: Vec<Share> = resources.iter().flat_map(|r| self.resolve(r)).collect();
        debug!(resources = resources.len(), shares = shares.len(), "Shares fetched");
        Ok(shares)
    }

    async fn commit(&self, request: &CommitRequest) -> AppResult<()> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(AppError::external_service("Shares backend unavailable"));
        }

        let target = request.resource();
        if let Some(upsert) = request.shares.iter().find(|u| !u.resource.same_resource(&target)) {
            return Err(AppError::validation(format!(
                "Upsert for '{}' targets {} but the request is for {}",
                upsert.principal_id, upsert.resource, target
            )));
        }

        let inherited: HashSet<PrincipalId> = self
            .resolve(&target)
            .into_iter()
            .filter(|s| s.is_inherited())
            .map(|s| s.principal.id)
            .collect();

        let mut events = Vec::with_capacity(request.shares.len() + request.revokes.len() + 1);
        {
            let mut grants = self.grants.entry(key_of(&target)).or_default();
            for upsert in &request.shares {
                self.unmask(&target, &upsert.principal_id);
                match grants.iter_mut().find(|g| g.principal.id == upsert.principal_id) {
                    Some(existing) => existing.permission = upsert.permission,
                    None => {
                        let principal = PrincipalRef {
                            id: upsert.principal_id.clone(),
                            kind: upsert.principal_type,
                        };
                        let share = Share::direct(principal, upsert.resource.clone(), upsert.permission)
                            .with_id(self.next_share_id());
                        grants.push(share);
                    }
                }
                events.push(ShareEvent::Upserted {
                    resource_type: request.resource_type.clone(),
                    resource_id: request.resource_id.to_string(),
                    principal_id: upsert.principal_id.to_string(),
                    permission: upsert.permission.as_u8(),
                });
            }
            for revoke in &request.revokes {
                let before = grants.len();
                grants.retain(|g| g.principal.id != revoke.principal_id);
                let removed = grants.len() < before;
                let masked = !removed
                    && inherited.contains(&revoke.principal_id)
                    && self
                        .masked
                        .entry(key_of(&target))
                        .or_default()
                        .insert(revoke.principal_id.clone());
                if masked {
                    debug!(resource = %target, principal = %revoke.principal_id, "Inherited grant masked");
                }
                if removed || masked {
                    events.push(ShareEvent::Revoked {
                        resource_type: request.resource_type.clone(),
                        resource_id: request.resource_id.to_string(),
                        principal_id: revoke.principal_id.to_string(),
                        permission: revoke.permission.as_u8(),
                    });
                }
            }
        }

        events.push(ShareEvent::Committed {
            resource_type: request.resource_type.clone(),
            resource_id: request.resource_id.to_string(),
            upserts: request.shares.len(),
            revokes: request.revokes.len(),
        });

        self.events
            .write()
            .await
            .extend(events.into_iter().map(|e| DomainEvent::share(None, e)));

        info!(
            resource = %target,
            upserts = request.shares.len(),
            revokes = request.revokes.len(),
            "Commit applied"
        );
        Ok(())
    }
}

/// Principal directory over a fixed list, in creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrincipalDirectory {
    principals: Vec<PrincipalSummary>,
}

impl MemoryPrincipalDirectory {
    pub fn new(principals: Vec<PrincipalSummary>) -> Self {
        Self { principals }
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryPrincipalDirectory {
    async fn search(&self, query: &PrincipalQuery) -> AppResult<PageResponse<PrincipalSummary>> {
        let needle = query.query.trim().to_lowercase();
        let mut hits: Vec<&PrincipalSummary> = self
            .principals
            .iter()
            .filter(|p| !query.excluded.contains(&p.id))
            .filter(|p| {
                needle.is_empty()
                    || p.id.as_str().to_lowercase().contains(&needle)
                    || p.title.to_lowercase().contains(&needle)
            })
            .collect();

        match query.sort.field.as_str() {
            "created" => {}
            "title" => hits.sort_by(|a, b| a.title.cmp(&b.title)),
            "id" => hits.sort_by(|a, b| a.id.cmp(&b.id)),
            other => {
                return Err(AppError::validation(format!("Unsupported sort field '{other}'")));
            }
        }
        if query.sort.descending {
            hits.reverse();
        }

        let total = hits.len() as u64;
        let items = hits
            .into_iter()
            .skip(query.page.from as usize)
            .take(query.page.size as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, query.page, total))
    }

    async fn labels(&self, requests: &[LabelRequest]) -> AppResult<Vec<PrincipalSummary>> {
        Ok(requests
            .iter()
            .flat_map(|r| {
                r.ids.iter().filter_map(move |id| {
                    self.principals
                        .iter()
                        .find(|p| p.kind == r.kind && &p.id == id)
                        .cloned()
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_core::config::DirectoryConfig;
    use sharegate_core::error::ErrorKind;
    use sharegate_entity::share::ShareUpsert;
    use std::collections::BTreeSet;

    fn folder() -> ResourceRef {
        ResourceRef::new("document", "folder-1")
    }

    fn doc() -> ResourceRef {
        ResourceRef::new("document", "doc-1").with_path("/folder-1/")
    }

    #[tokio::test]
    async fn test_nearest_ancestor_wins_and_direct_overrides() {
        let backend = MemorySharesBackend::new();
        let root = ResourceRef::new("document", "root");
        backend.set_parent(&doc(), &folder());
        backend.set_parent(&folder(), &root);
        backend.grant(PrincipalRef::user("alice"), &root, PermissionLevel::View);
        backend.grant(PrincipalRef::user("alice"), &folder(), PermissionLevel::Comment);
        backend.grant(PrincipalRef::user("bob"), &root, PermissionLevel::Edit);
        backend.grant(PrincipalRef::user("bob"), &doc(), PermissionLevel::View);

        let shares = backend.fetch_shares(&[doc()]).await.unwrap();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].principal_id().as_str(), "bob");
        assert!(!shares[0].is_inherited());
        assert_eq!(shares[1].principal_id().as_str(), "alice");
        assert!(shares[1].is_inherited());
        assert_eq!(shares[1].permission, PermissionLevel::Comment);
        assert_eq!(shares[1].resource.path.as_deref(), Some("/folder-1/"));
    }

    #[tokio::test]
    async fn test_commit_applies_and_records_events() {
        let backend = MemorySharesBackend::new();
        backend.grant(PrincipalRef::user("alice"), &doc(), PermissionLevel::View);
        let alice = backend.direct_grants(&doc()).remove(0);
        let bob = Share::direct(PrincipalRef::user("bob"), doc(), PermissionLevel::Edit);

        let request = CommitRequest::new(&doc(), vec![ShareUpsert::from(&bob)], vec![(&alice).into()]);
        backend.commit(&request).await.unwrap();

        let grants = backend.direct_grants(&doc());
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].principal_id().as_str(), "bob");

        let events = backend.events().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2].as_share(), Some(ShareEvent::Committed { upserts: 1, revokes: 1, .. })));
    }

    #[tokio::test]
    async fn test_revoking_inherited_grant_masks_it() {
        let backend = MemorySharesBackend::new();
        backend.set_parent(&doc(), &folder());
        backend.grant(PrincipalRef::user("alice"), &folder(), PermissionLevel::View);
        let alice = backend.fetch_shares(&[doc()]).await.unwrap().remove(0);
        assert!(alice.is_inherited());

        let request = CommitRequest::new(&doc(), vec![], vec![(&alice).into()]);
        backend.commit(&request).await.unwrap();

        assert!(backend.fetch_shares(&[doc()]).await.unwrap().is_empty());
        assert_eq!(backend.masked_principals(&doc()), vec![PrincipalId::new("alice")]);
        assert_eq!(backend.direct_grants(&folder()).len(), 1);
        let events = backend.events().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].as_share(), Some(ShareEvent::Revoked { .. })));

        // A later direct grant lifts the mask.
        let back = Share::direct(PrincipalRef::user("alice"), doc(), PermissionLevel::Edit);
        backend
            .commit(&CommitRequest::new(&doc(), vec![ShareUpsert::from(&back)], vec![]))
            .await
            .unwrap();
        assert!(backend.masked_principals(&doc()).is_empty());
    }

    #[tokio::test]
    async fn test_revoking_unknown_principal_records_nothing() {
        let backend = MemorySharesBackend::new();
        let ghost = Share::direct(PrincipalRef::user("ghost"), doc(), PermissionLevel::View);
        backend
            .commit(&CommitRequest::new(&doc(), vec![], vec![(&ghost).into()]))
            .await
            .unwrap();

        assert!(backend.masked_principals(&doc()).is_empty());
        let events = backend.events().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].as_share(), Some(ShareEvent::Committed { revokes: 1, .. })));
    }

    #[tokio::test]
    async fn test_failed_commit_changes_nothing() {
        let backend = MemorySharesBackend::new();
        backend.fail_next_commit();
        let bob = Share::direct(PrincipalRef::user("bob"), doc(), PermissionLevel::Edit);
        let request = CommitRequest::new(&doc(), vec![ShareUpsert::from(&bob)], vec![]);

        let err = backend.commit(&request).await.unwrap_err();
        assert!(err.is(ErrorKind::ExternalService));
        assert!(backend.direct_grants(&doc()).is_empty());
        assert!(backend.events().await.is_empty());

        backend.commit(&request).await.unwrap();
        assert_eq!(backend.commit_count(), 2);
    }

    #[tokio::test]
    async fn test_directory_search_and_labels() {
        let directory = MemoryPrincipalDirectory::new(vec![
            PrincipalSummary::user("alice", "Alice"),
            PrincipalSummary::user("bob", "Bob"),
            PrincipalSummary::user("bobby", "Roberta"),
        ]);

        let query = PrincipalQuery::new("bob", &DirectoryConfig::default())
            .unwrap()
            .excluding(BTreeSet::from([sharegate_core::types::PrincipalId::new("bob")]));
        let page = directory.search(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id.as_str(), "bobby");

        let labels = directory
            .labels(&[LabelRequest {
                kind: sharegate_entity::PrincipalKind::User,
                ids: vec!["alice".into(), "zed".into()],
            }])
            .await
            .unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].title, "Alice");
    }
}
