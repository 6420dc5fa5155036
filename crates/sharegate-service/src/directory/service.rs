//! Authorized principal search for the add-shares picker.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use sharegate_core::config::DirectoryConfig;
use sharegate_core::error::AppError;
use sharegate_core::traits::Authorizer;
use sharegate_core::types::{PageResponse, PrincipalId};
use sharegate_entity::permission::SharingAction;

use super::query::{PickerEntry, PrincipalQuery};
use super::PrincipalDirectory;

/// Runs picker searches against the directory.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    directory: Arc<dyn PrincipalDirectory>,
    authorizer: Arc<dyn Authorizer>,
    config: DirectoryConfig,
}

impl DirectoryService {
    pub fn new(
        directory: Arc<dyn PrincipalDirectory>,
        authorizer: Arc<dyn Authorizer>,
        config: DirectoryConfig,
    ) -> Self {
        Self {
            directory,
            authorizer,
            config,
        }
    }

    /// Builds the first-page query for `text`, leaving out `excluded`.
    pub fn query(&self, text: &str, excluded: BTreeSet<PrincipalId>) -> Result<PrincipalQuery, AppError> {
        Ok(PrincipalQuery::new(text, &self.config)?.excluding(excluded))
    }

    /// Searches the directory and flags excluded hits.
    ///
    /// Without the principal-search grant the picker shows nothing; that
    /// is an empty page, not an error.
    pub async fn search(
        &self,
        query: &PrincipalQuery,
        selected: &[PrincipalId],
    ) -> Result<PageResponse<PickerEntry>, AppError> {
        if !self.authorizer.has_auth(SharingAction::PrincipalSearch.as_str()) {
            debug!("Principal search not granted, returning empty page");
            return Ok(PageResponse::empty(query.page));
        }

        let page = self.directory.search(query).await?;
        debug!(
            query = %query.query,
            from = query.page.from,
            hits = page.items.len(),
            total = page.total,
            "Principal directory searched"
        );
        Ok(page.map(|principal| PickerEntry::mark(principal, &query.excluded, selected)))
    }
}
