//! Principal directory: search for principals to share with and resolve
//! display labels.

pub mod query;
pub mod service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sharegate_core::error::AppError;
use sharegate_core::types::{PageResponse, PrincipalId};
use sharegate_entity::principal::{PrincipalKind, PrincipalSummary};

pub use query::{PickerEntry, PrincipalQuery, SortOrder};
pub use service::DirectoryService;

/// Ids of one principal kind whose labels should be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRequest {
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
    pub ids: Vec<PrincipalId>,
}

/// Searchable, paged principal directory.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Runs one paged search. Ids in `query.excluded` are left out.
    async fn search(&self, query: &PrincipalQuery) -> Result<PageResponse<PrincipalSummary>, AppError>;

    /// Resolves labels for a batch of ids, grouped by kind.
    ///
    /// Unknown ids are skipped rather than failing the batch.
    async fn labels(&self, requests: &[LabelRequest]) -> Result<Vec<PrincipalSummary>, AppError>;
}
