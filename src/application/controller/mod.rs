//! Repository detail controller
//!
//! Owns every piece of page state and drives the registry gateways. All
//! outstanding calls live in one unordered futures set polled from the
//! caller's task, so completions are applied strictly one at a time and
//! no locking is needed around the security index.

mod events;

pub use events::{ControllerEvent, Operation};

use crate::ports::inbound::RepositoryDetailPort;
use crate::ports::outbound::{
    BuildHistoryGateway, BuildNotification, RepositoryGateway, SecurityCounter, Subscriptions,
    TagSecurityGateway,
};
use crate::repository_detail::domain::{
    Build, BuildRecord, ImageId, Repository, RepositoryName, SecurityIndex, SecuritySummary, Tag,
};
use crate::repository_detail::policies::{ImageDedupPolicy, SecurityLookup, TagWindowPolicy};
use crate::repository_detail::services::{BuildHistoryWindow, SelectionState, SortState};
use crate::shared::error::DetailError;
use crate::shared::Result;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Registry host used in the pull command when none is configured
pub const DEFAULT_REGISTRY_URL: &str = "localhost:5000";

/// Result of one outstanding gateway call, tagged with the request it answers
enum Completion {
    Repository {
        request: u64,
        result: Result<Repository>,
    },
    Security {
        generation: u64,
        lookup: SecurityLookup,
        result: Result<SecuritySummary>,
    },
    BuildHistory {
        request: u64,
        result: Result<Vec<BuildRecord>>,
    },
    Saved {
        result: Result<()>,
    },
}

/// What woke `next_event`
enum Wake {
    Completed(Completion),
    Notified(std::result::Result<BuildNotification, RecvError>),
    Permission(Option<bool>),
}

/// RepositoryDetailController - state and orchestration of the detail page
///
/// # Type Parameters
/// * `R` - RepositoryGateway implementation
/// * `B` - BuildHistoryGateway implementation
/// * `S` - TagSecurityGateway implementation
/// * `C` - SecurityCounter implementation
///
/// Repository and build-history results overtaken by a newer request of the
/// same kind are discarded when they arrive. Each successful repository load
/// starts a new security generation; lookups from an older generation are
/// discarded too. A failed reload leaves the generation, and the lookups
/// still in flight for the displayed tags, untouched.
pub struct RepositoryDetailController<R, B, S, C> {
    repositories: Arc<R>,
    builds: Arc<B>,
    security: Arc<S>,
    counter: C,
    registry_url: String,
    history_window: BuildHistoryWindow,

    name: Option<RepositoryName>,
    docker_pull_command: Option<String>,
    repository: Option<Repository>,
    tag_list: Vec<Tag>,
    build_history: Vec<Build>,
    security_index: SecurityIndex,
    selection: SelectionState,
    sort: SortState,

    repository_request: u64,
    security_generation: u64,
    history_request: u64,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
    build_events: Option<broadcast::Receiver<BuildNotification>>,
    permission: Option<watch::Receiver<bool>>,
}

impl<R, B, S, C> RepositoryDetailController<R, B, S, C>
where
    R: RepositoryGateway + 'static,
    B: BuildHistoryGateway + 'static,
    S: TagSecurityGateway + 'static,
    C: SecurityCounter,
{
    /// Creates an inactive controller over the given gateways
    pub fn new(repositories: Arc<R>, builds: Arc<B>, security: Arc<S>, counter: C) -> Self {
        Self {
            repositories,
            builds,
            security,
            counter,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            history_window: BuildHistoryWindow::default(),
            name: None,
            docker_pull_command: None,
            repository: None,
            tag_list: Vec::new(),
            build_history: Vec::new(),
            security_index: SecurityIndex::new(),
            selection: SelectionState::new(),
            sort: SortState::new(),
            repository_request: 0,
            security_generation: 0,
            history_request: 0,
            pending: FuturesUnordered::new(),
            build_events: None,
            permission: None,
        }
    }

    /// Registry host shown in the `docker pull` command
    pub fn with_registry_url(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = registry_url.into();
        self
    }

    /// Window size and display offset for the build history
    pub fn with_history_window(mut self, window: BuildHistoryWindow) -> Self {
        self.history_window = window;
        self
    }

    /// Binds the controller to `name`, takes over `subscriptions`, and starts
    /// the repository and build-history loads side by side.
    pub fn activate(&mut self, name: RepositoryName, subscriptions: Subscriptions) {
        info!(repository = %name, "activating repository detail");

        self.docker_pull_command = Some(format!(
            "docker pull {}/{}/{}",
            self.registry_url.trim_end_matches('/'),
            name.organization(),
            name.name()
        ));
        self.name = Some(name);

        self.build_events = subscriptions.build_events;
        self.permission = subscriptions.permission;
        if let Some(permission) = self.permission.as_mut() {
            let allowed = *permission.borrow_and_update();
            self.selection.set_can_manage_builds(allowed);
        }

        self.issue_repository_load();
        self.issue_build_history_load();
    }

    /// Unsubscribes from every broadcast and abandons outstanding calls.
    ///
    /// Loaded data stays readable; nothing further is applied to it.
    pub fn deactivate(&mut self) {
        if let Some(name) = &self.name {
            info!(repository = %name, pending = self.pending.len(), "deactivating repository detail");
        }
        self.build_events = None;
        self.permission = None;
        self.pending = FuturesUnordered::new();
        self.name = None;
    }

    pub fn is_active(&self) -> bool {
        self.name.is_some()
    }

    /// Starts a repository reload; the result arrives through `next_event`.
    ///
    /// Returns the request number of the reload.
    pub fn load_repository(&mut self) -> Result<u64> {
        if self.name.is_none() {
            return Err(DetailError::NotActivated.into());
        }
        Ok(self.issue_repository_load())
    }

    /// Starts a build-history reload; the result replaces the current list.
    pub fn load_build_history(&mut self) -> Result<()> {
        if self.name.is_none() {
            return Err(DetailError::NotActivated.into());
        }
        self.issue_build_history_load();
        Ok(())
    }

    /// Issues one security lookup per distinct image in `tags`, in the
    /// current security generation. Returns the number of lookups issued.
    pub fn enrich_security(&mut self, tags: &[Tag]) -> Result<usize> {
        let Some(name) = self.name.clone() else {
            return Err(DetailError::NotActivated.into());
        };
        let lookups = ImageDedupPolicy::lookups(tags);
        Ok(self.issue_security_lookups(&name, lookups))
    }

    /// Edits the repository description locally; `false` before any load
    pub fn set_description(&mut self, description: Option<String>) -> bool {
        match self.repository.as_mut() {
            Some(repository) => {
                repository.set_description(description);
                true
            }
            None => false,
        }
    }

    /// Persists the loaded repository's descriptive fields
    pub fn save_repository(&mut self) -> Result<()> {
        let Some(repository) = self.repository.clone() else {
            return Err(DetailError::Validation {
                message: "no repository has been loaded yet".to_string(),
            }
            .into());
        };
        let gateway = Arc::clone(&self.repositories);
        self.pending.push(
            async move {
                let result = gateway.update_repository(&repository).await;
                Completion::Saved { result }
            }
            .boxed(),
        );
        Ok(())
    }

    /// Security summary for `image_id`; `None` while pending or unknown
    pub fn get_security(&self, image_id: &ImageId) -> Option<&SecuritySummary> {
        self.security_index.get(image_id)
    }

    pub fn open_build_detail(&mut self, build_id: &str) -> bool {
        let opened = self.selection.open_build_detail(build_id);
        if !opened {
            debug!(build_id, "build detail requested without permission; ignored");
        }
        opened
    }

    pub fn close_build_detail(&mut self) {
        self.selection.close_build_detail();
    }

    pub fn open_new_build(&mut self) {
        self.selection.open_new_build();
    }

    pub fn close_new_build(&mut self) {
        self.selection.close_new_build();
    }

    pub fn open_tag_security(&mut self, tag: &Tag) {
        self.selection.open_tag_security(tag);
    }

    pub fn close_tag_security(&mut self) {
        self.selection.close_tag_security();
    }

    pub fn sort_click(&mut self, column: &str) {
        self.sort.click(column);
    }

    /// Number of gateway calls still outstanding
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Waits for the next completion or subscription notification and
    /// applies it.
    ///
    /// Returns `None` once nothing is outstanding and every subscription is
    /// gone.
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        let wake = tokio::select! {
            Some(completion) = self.pending.next(), if !self.pending.is_empty() => {
                Wake::Completed(completion)
            }
            received = next_notification(&mut self.build_events), if self.build_events.is_some() => {
                Wake::Notified(received)
            }
            changed = next_permission(&mut self.permission), if self.permission.is_some() => {
                Wake::Permission(changed)
            }
            else => return None,
        };

        Some(match wake {
            Wake::Completed(completion) => self.apply(completion),
            Wake::Notified(Ok(BuildNotification)) | Wake::Notified(Err(RecvError::Lagged(_))) => {
                debug!("build notification received; reloading build history");
                self.issue_build_history_load();
                ControllerEvent::BuildNotified
            }
            Wake::Notified(Err(RecvError::Closed)) => {
                self.build_events = None;
                ControllerEvent::SubscriptionClosed
            }
            Wake::Permission(Some(allowed)) => {
                self.selection.set_can_manage_builds(allowed);
                ControllerEvent::PermissionChanged(allowed)
            }
            Wake::Permission(None) => {
                self.permission = None;
                ControllerEvent::SubscriptionClosed
            }
        })
    }

    /// Waits for the next outstanding call only, ignoring subscriptions.
    /// Returns `None` when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<ControllerEvent> {
        let completion = self.pending.next().await?;
        Some(self.apply(completion))
    }

    /// Applies every outstanding call, including the ones they trigger
    pub async fn run_until_idle(&mut self) -> Vec<ControllerEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_completion().await {
            events.push(event);
        }
        events
    }

    fn issue_repository_load(&mut self) -> u64 {
        self.repository_request += 1;
        let request = self.repository_request;
        let Some(name) = self.name.clone() else {
            return request;
        };

        debug!(repository = %name, request, "loading repository");
        let gateway = Arc::clone(&self.repositories);
        self.pending.push(
            async move {
                let result = gateway.fetch_repository(&name).await;
                Completion::Repository { request, result }
            }
            .boxed(),
        );
        request
    }

    fn issue_build_history_load(&mut self) {
        self.history_request += 1;
        let request = self.history_request;
        let Some(name) = self.name.clone() else {
            return;
        };

        let window = self.history_window.size();
        let gateway = Arc::clone(&self.builds);
        self.pending.push(
            async move {
                let result = gateway.fetch_builds(&name, window).await;
                Completion::BuildHistory { request, result }
            }
            .boxed(),
        );
    }

    fn issue_security_lookups(&mut self, name: &RepositoryName, lookups: Vec<SecurityLookup>) -> usize {
        let generation = self.security_generation;
        let issued = lookups.len();

        for lookup in lookups {
            debug!(
                image_id = %lookup.image_id,
                tag = %lookup.tag_name,
                generation,
                "issuing security lookup"
            );
            let gateway = Arc::clone(&self.security);
            let name = name.clone();
            self.pending.push(
                async move {
                    let result = gateway.fetch_tag_security(&name, &lookup.tag_name).await;
                    Completion::Security {
                        generation,
                        lookup,
                        result,
                    }
                }
                .boxed(),
            );
        }

        issued
    }

    fn apply(&mut self, completion: Completion) -> ControllerEvent {
        match completion {
            Completion::Repository { request, result } => self.apply_repository(request, result),
            Completion::Security {
                generation,
                lookup,
                result,
            } => self.apply_security(generation, lookup, result),
            Completion::BuildHistory { request, result } => {
                self.apply_build_history(request, result)
            }
            Completion::Saved { result } => match result {
                Ok(()) => {
                    info!("repository saved");
                    ControllerEvent::RepositorySaved
                }
                Err(error) => {
                    warn!(error = %error, "repository save failed");
                    ControllerEvent::RepositorySaveFailed(error)
                }
            },
        }
    }

    fn apply_repository(&mut self, request: u64, result: Result<Repository>) -> ControllerEvent {
        if request != self.repository_request {
            debug!(request, current = self.repository_request, "discarding superseded repository load");
            return ControllerEvent::StaleResultDiscarded(Operation::RepositoryLoad);
        }

        let repository = match result {
            Ok(repository) => repository,
            Err(error) => {
                warn!(error = %error, "repository load failed");
                return ControllerEvent::RepositoryLoadFailed(error);
            }
        };

        // Truncation completes before the fan-out it feeds is issued.
        let tag_list = TagWindowPolicy::reduce(repository.tags());
        let lookups = ImageDedupPolicy::lookups(&tag_list);
        let name = repository.name().clone();
        let total_tags = repository.tags().len();

        self.repository = Some(repository);
        self.tag_list = tag_list;
        // Lookups from earlier loads answer for a tag list that is gone now.
        self.security_generation += 1;
        let issued = self.issue_security_lookups(&name, lookups);

        info!(
            repository = %name,
            tags = total_tags,
            shown = self.tag_list.len(),
            lookups = issued,
            "repository loaded"
        );
        ControllerEvent::RepositoryLoaded {
            tags: self.tag_list.len(),
            lookups: issued,
        }
    }

    fn apply_security(
        &mut self,
        generation: u64,
        lookup: SecurityLookup,
        result: Result<SecuritySummary>,
    ) -> ControllerEvent {
        if generation != self.security_generation {
            debug!(
                image_id = %lookup.image_id,
                generation,
                current = self.security_generation,
                "discarding security result from superseded reload"
            );
            return ControllerEvent::StaleResultDiscarded(Operation::SecurityLookup);
        }

        match result {
            Ok(summary) => {
                self.counter.record(&lookup.image_id, &summary);
                self.security_index.insert(lookup.image_id.clone(), summary);
                ControllerEvent::SecurityLoaded {
                    image_id: lookup.image_id,
                    tag_name: lookup.tag_name,
                }
            }
            Err(error) => {
                warn!(
                    image_id = %lookup.image_id,
                    tag = %lookup.tag_name,
                    error = %error,
                    "security lookup failed"
                );
                ControllerEvent::SecurityLookupFailed {
                    image_id: lookup.image_id,
                    tag_name: lookup.tag_name,
                    error,
                }
            }
        }
    }

    fn apply_build_history(
        &mut self,
        request: u64,
        result: Result<Vec<BuildRecord>>,
    ) -> ControllerEvent {
        if request != self.history_request {
            debug!(request, current = self.history_request, "discarding superseded build history");
            return ControllerEvent::StaleResultDiscarded(Operation::BuildHistoryLoad);
        }

        match result {
            Ok(records) => {
                self.build_history = self.history_window.apply(records);
                ControllerEvent::BuildHistoryLoaded {
                    builds: self.build_history.len(),
                }
            }
            Err(error) => {
                warn!(error = %error, "build history load failed");
                ControllerEvent::BuildHistoryLoadFailed(error)
            }
        }
    }
}

impl<R, B, S, C> RepositoryDetailPort for RepositoryDetailController<R, B, S, C> {
    fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    fn tag_list(&self) -> &[Tag] {
        &self.tag_list
    }

    fn build_history(&self) -> &[Build] {
        &self.build_history
    }

    fn security_for(&self, image_id: &ImageId) -> Option<&SecuritySummary> {
        self.security_index.get(image_id)
    }

    fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn sort_state(&self) -> &SortState {
        &self.sort
    }

    fn docker_pull_command(&self) -> Option<&str> {
        self.docker_pull_command.as_deref()
    }
}

async fn next_notification(
    receiver: &mut Option<broadcast::Receiver<BuildNotification>>,
) -> std::result::Result<BuildNotification, RecvError> {
    match receiver {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

async fn next_permission(receiver: &mut Option<watch::Receiver<bool>>) -> Option<bool> {
    match receiver {
        Some(receiver) => {
            receiver.changed().await.ok()?;
            let allowed = *receiver.borrow_and_update();
            Some(allowed)
        }
        None => std::future::pending().await,
    }
}
