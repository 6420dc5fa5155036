//! Shares API boundary.

use async_trait::async_trait;

use sharegate_core::error::AppError;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::{CommitRequest, Share};

/// Backend that stores share grants.
#[async_trait]
pub trait SharesApi: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the shares of every listed resource as one flat list.
    ///
    /// Each share carries its `resource.id`, so callers split the list per
    /// resource themselves. Inherited grants come back with
    /// `origin = inherited`.
    async fn fetch_shares(&self, resources: &[ResourceRef]) -> Result<Vec<Share>, AppError>;

    /// Applies one commit atomically: every upsert and revoke, or nothing.
    async fn commit(&self, request: &CommitRequest) -> Result<(), AppError>;
}
