use crate::repository_detail::domain::{RepositoryName, SecuritySummary};
use crate::shared::Result;
use async_trait::async_trait;

/// TagSecurityGateway port for vulnerability scan summaries
///
/// The registry addresses scans by tag, so lookups take a tag name even
/// though results describe the underlying image.
#[async_trait]
pub trait TagSecurityGateway: Send + Sync {
    async fn fetch_tag_security(
        &self,
        name: &RepositoryName,
        tag_name: &str,
    ) -> Result<SecuritySummary>;
}
