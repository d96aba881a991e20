use crate::repository_detail::domain::{BuildRecord, RepositoryName};
use crate::shared::Result;
use async_trait::async_trait;

/// BuildHistoryGateway port for the most recent builds of a repository
#[async_trait]
pub trait BuildHistoryGateway: Send + Sync {
    /// Fetches at most `window` build records, newest first
    async fn fetch_builds(&self, name: &RepositoryName, window: usize) -> Result<Vec<BuildRecord>>;
}
