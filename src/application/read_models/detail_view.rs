//! Detail page read model
//!
//! A flattened, serializable snapshot of what the detail page shows at one
//! instant. Built from the controller's read surface and handed to the
//! presenters.

use crate::repository_detail::domain::SecuritySummary;
use crate::repository_detail::services::SortState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Main read model for the repository detail page
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    /// `organization/repository`
    pub repository: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub docker_pull_command: Option<String>,
    /// Displayed tags, newest first
    pub tags: Vec<TagView>,
    /// Recent builds in the order the registry returned them
    pub builds: Vec<BuildView>,
    /// Whether build details may be opened
    pub can_manage_builds: bool,
    pub sort: SortState,
}

impl DetailView {
    /// Tags whose security lookup has not produced a summary
    pub fn pending_security_count(&self) -> usize {
        self.tags
            .iter()
            .filter(|tag| matches!(tag.security, SecurityStatus::Pending))
            .count()
    }
}

/// One row of the tag table
#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub name: String,
    pub image_id: String,
    pub last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub security: SecurityStatus,
}

/// Security column of a tag row
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SecurityStatus {
    /// Lookup outstanding, failed, or superseded
    Pending,
    Available {
        vulnerabilities: usize,
        summary: SecuritySummary,
    },
}

/// One row of the build history
#[derive(Debug, Clone, Serialize)]
pub struct BuildView {
    pub id: String,
    pub phase: String,
    pub started: String,
}
