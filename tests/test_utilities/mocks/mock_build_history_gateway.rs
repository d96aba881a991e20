use async_trait::async_trait;
use registry_detail::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock BuildHistoryGateway whose build list can change between calls
#[derive(Default)]
pub struct MockBuildHistoryGateway {
    builds: Mutex<Vec<BuildRecord>>,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockBuildHistoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build(self, build: BuildRecord) -> Self {
        self.builds.lock().unwrap().push(build);
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Makes `build` the newest entry for subsequent calls
    pub fn push_front(&self, build: BuildRecord) {
        self.builds.lock().unwrap().insert(0, build);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildHistoryGateway for MockBuildHistoryGateway {
    async fn fetch_builds(&self, _name: &RepositoryName, window: usize) -> Result<Vec<BuildRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock build history gateway error");
        }
        let builds = self.builds.lock().unwrap();
        Ok(builds.iter().take(window).cloned().collect())
    }
}
