//! Builder for constructing DetailView from the controller's read surface

use super::detail_view::{BuildView, DetailView, SecurityStatus, TagView};
use crate::ports::inbound::RepositoryDetailPort;
use crate::repository_detail::domain::{Build, Tag};

/// Builder for constructing DetailView snapshots
pub struct DetailViewBuilder;

impl DetailViewBuilder {
    /// Builds a snapshot of everything `port` currently exposes.
    ///
    /// Returns `None` until a repository load has succeeded.
    pub fn build(port: &impl RepositoryDetailPort) -> Option<DetailView> {
        let repository = port.repository()?;

        let tags = port
            .tag_list()
            .iter()
            .map(|tag| Self::build_tag(port, tag))
            .collect();
        let builds = port.build_history().iter().map(Self::build_build).collect();

        Some(DetailView {
            repository: repository.name().qualified(),
            description: repository.description().map(str::to_string),
            is_public: repository.is_public(),
            docker_pull_command: port.docker_pull_command().map(str::to_string),
            tags,
            builds,
            can_manage_builds: port.selection().can_manage_builds(),
            sort: port.sort_state().clone(),
        })
    }

    fn build_tag(port: &impl RepositoryDetailPort, tag: &Tag) -> TagView {
        let security = match port.security_for(tag.image_id()) {
            Some(summary) => SecurityStatus::Available {
                vulnerabilities: summary.vulnerability_count(),
                summary: summary.clone(),
            },
            None => SecurityStatus::Pending,
        };

        TagView {
            name: tag.name().to_string(),
            image_id: tag.image_id().to_string(),
            last_modified: tag.last_modified(),
            size: tag.size(),
            security,
        }
    }

    fn build_build(build: &Build) -> BuildView {
        BuildView {
            id: build.id().to_string(),
            phase: build.phase().to_string(),
            started: build.formatted_started().to_string(),
        }
    }
}
