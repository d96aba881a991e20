use crate::repository_detail::domain::{Repository, RepositoryName};
use crate::shared::Result;
use async_trait::async_trait;

/// RepositoryGateway port for repository metadata and its full tag set
///
/// Implementations must be `Send + Sync`; the controller keeps several
/// calls outstanding at once.
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// Fetches the repository with every tag it currently has
    ///
    /// # Errors
    /// Returns an error if the request fails, the registry answers with an
    /// error status, or the response cannot be parsed
    async fn fetch_repository(&self, name: &RepositoryName) -> Result<Repository>;

    /// Persists the repository's descriptive fields
    async fn update_repository(&self, repository: &Repository) -> Result<()>;
}
