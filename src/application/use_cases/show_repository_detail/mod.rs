use crate::application::controller::{ControllerEvent, RepositoryDetailController};
use crate::application::dto::DetailRequest;
use crate::application::read_models::{DetailView, DetailViewBuilder};
use crate::ports::outbound::{
    BuildHistoryGateway, ProgressReporter, RepositoryGateway, SecurityCounter, TagSecurityGateway,
};
use crate::shared::Result;
use std::future::Future;

/// Counts security lookups issued and settled, for the progress bar
#[derive(Debug, Default)]
struct LookupProgress {
    issued: usize,
    settled: usize,
}

/// ShowRepositoryDetailUseCase - loads and keeps a repository detail page
///
/// Wraps a [`RepositoryDetailController`], drives it to completion and
/// turns its events into progress messages and [`DetailView`] snapshots.
///
/// # Type Parameters
/// * `R` - RepositoryGateway implementation
/// * `B` - BuildHistoryGateway implementation
/// * `S` - TagSecurityGateway implementation
/// * `C` - SecurityCounter implementation
/// * `PR` - ProgressReporter implementation
pub struct ShowRepositoryDetailUseCase<R, B, S, C, PR> {
    controller: RepositoryDetailController<R, B, S, C>,
    progress_reporter: PR,
}

impl<R, B, S, C, PR> ShowRepositoryDetailUseCase<R, B, S, C, PR>
where
    R: RepositoryGateway + 'static,
    B: BuildHistoryGateway + 'static,
    S: TagSecurityGateway + 'static,
    C: SecurityCounter,
    PR: ProgressReporter,
{
    /// Creates a new use case around an inactive controller
    pub fn new(controller: RepositoryDetailController<R, B, S, C>, progress_reporter: PR) -> Self {
        Self {
            controller,
            progress_reporter,
        }
    }

    /// Activates the controller for the requested repository and waits for
    /// the repository, its security summaries and the build history.
    ///
    /// # Errors
    /// Returns an error if the repository itself cannot be loaded. Failed
    /// security lookups and a failed build history are reported as warnings
    /// and leave the corresponding parts of the view empty.
    pub async fn execute(&mut self, request: DetailRequest) -> Result<DetailView> {
        self.progress_reporter.report(&format!(
            "🔍 Loading repository: {}",
            request.repository
        ));

        // Step 1: Activate (starts repository and build history loads)
        let name = request.repository.clone();
        self.controller.activate(request.repository, request.subscriptions);

        // Step 2: Apply completions until nothing is outstanding
        let mut progress = LookupProgress::default();
        while let Some(event) = self.controller.next_completion().await {
            if let ControllerEvent::RepositoryLoadFailed(error) = event {
                self.controller.deactivate();
                return Err(error.context(format!("Failed to load repository {}", name)));
            }
            self.report_event(&event, &mut progress);
        }

        // Step 3: Snapshot
        let view = self.snapshot()?;
        self.progress_reporter.report_completion(&format!(
            "✅ Repository detail ready: {} tag(s), {} build(s)",
            view.tags.len(),
            view.builds.len()
        ));
        Ok(view)
    }

    /// Replaces the repository description and saves the repository
    ///
    /// # Errors
    /// Returns an error if no repository is loaded or the save fails. The
    /// edited description stays in the local state either way.
    pub async fn update_description(&mut self, description: Option<String>) -> Result<DetailView> {
        self.controller.set_description(description);
        self.controller.save_repository()?;
        self.progress_reporter.report("💾 Saving repository...");

        let mut progress = LookupProgress::default();
        while let Some(event) = self.controller.next_completion().await {
            if let ControllerEvent::RepositorySaveFailed(error) = event {
                return Err(error.context("Failed to save repository"));
            }
            self.report_event(&event, &mut progress);
        }

        self.snapshot()
    }

    /// Keeps the page live until `shutdown` resolves or every subscription
    /// and outstanding call is gone.
    ///
    /// `on_change` receives a fresh snapshot after each event that may have
    /// changed the page. Failures in this phase are reported and never end
    /// the watch.
    pub async fn watch<F, H>(&mut self, shutdown: F, mut on_change: H) -> Result<()>
    where
        F: Future<Output = ()>,
        H: FnMut(&DetailView),
    {
        tokio::pin!(shutdown);
        let mut progress = LookupProgress::default();

        loop {
            // next_event only awaits cancel-safe operations before applying
            let event = tokio::select! {
                _ = &mut shutdown => break,
                event = self.controller.next_event() => event,
            };
            let Some(event) = event else {
                break;
            };

            self.report_event(&event, &mut progress);
            if event.changes_view() {
                if let Some(view) = DetailViewBuilder::build(&self.controller) {
                    on_change(&view);
                }
            }
        }

        self.controller.deactivate();
        Ok(())
    }

    /// Current snapshot of the page
    pub fn snapshot(&self) -> Result<DetailView> {
        DetailViewBuilder::build(&self.controller)
            .ok_or_else(|| anyhow::anyhow!("No repository has been loaded yet"))
    }

    pub fn controller(&self) -> &RepositoryDetailController<R, B, S, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RepositoryDetailController<R, B, S, C> {
        &mut self.controller
    }

    fn report_event(&self, event: &ControllerEvent, progress: &mut LookupProgress) {
        match event {
            ControllerEvent::RepositoryLoaded { tags, lookups } => {
                self.progress_reporter
                    .report(&format!("✅ Loaded repository with {} displayed tag(s)", tags));
                if *lookups > 0 {
                    progress.issued += lookups;
                    self.progress_reporter.report(&format!(
                        "🛡️  Fetching security data for {} image(s)...",
                        lookups
                    ));
                }
            }
            ControllerEvent::RepositoryLoadFailed(error) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Repository reload failed, keeping previous data: {}",
                    error
                ));
            }
            ControllerEvent::SecurityLoaded { tag_name, .. } => {
                progress.settled += 1;
                self.progress_reporter
                    .report_progress(progress.settled, progress.issued, Some(tag_name));
            }
            ControllerEvent::SecurityLookupFailed {
                tag_name, error, ..
            } => {
                progress.settled += 1;
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Security data for tag '{}' is unavailable: {}",
                    tag_name, error
                ));
            }
            ControllerEvent::BuildHistoryLoaded { builds } => {
                self.progress_reporter
                    .report(&format!("🏗️  Loaded {} recent build(s)", builds));
            }
            ControllerEvent::BuildHistoryLoadFailed(error) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Build history is unavailable: {}",
                    error
                ));
            }
            ControllerEvent::RepositorySaved => {
                self.progress_reporter.report("✅ Repository saved");
            }
            ControllerEvent::RepositorySaveFailed(error) => {
                self.progress_reporter
                    .report_error(&format!("❌ Failed to save repository: {}", error));
            }
            ControllerEvent::PermissionChanged(allowed) => {
                let state = if *allowed { "granted" } else { "revoked" };
                self.progress_reporter
                    .report(&format!("🔑 Build management {}", state));
            }
            ControllerEvent::BuildNotified
            | ControllerEvent::StaleResultDiscarded(_)
            | ControllerEvent::SubscriptionClosed => {}
        }
    }
}
