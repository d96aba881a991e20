use crate::repository_detail::domain::{Build, ImageId, Repository, SecuritySummary, Tag};
use crate::repository_detail::services::{SelectionState, SortState};

/// RepositoryDetailPort - read surface of the repository detail page
///
/// Everything returned here reflects the last completed load; nothing
/// blocks on outstanding requests.
pub trait RepositoryDetailPort {
    /// The most recently loaded repository, if any load has succeeded
    fn repository(&self) -> Option<&Repository>;

    /// Displayed tags: newest first, at most five
    fn tag_list(&self) -> &[Tag];

    /// Recent builds, each with its display timestamp
    fn build_history(&self) -> &[Build];

    /// Security summary for an image.
    ///
    /// `None` means the lookup has not completed (or never will); it is not
    /// an error.
    fn security_for(&self, image_id: &ImageId) -> Option<&SecuritySummary>;

    /// Popup flags and recorded selections
    fn selection(&self) -> &SelectionState;

    /// Sort column and direction
    fn sort_state(&self) -> &SortState;

    /// `docker pull` command for the active repository
    fn docker_pull_command(&self) -> Option<&str>;
}
