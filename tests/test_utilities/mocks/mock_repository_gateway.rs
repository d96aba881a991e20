use async_trait::async_trait;
use registry_detail::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock RepositoryGateway serving a fixed tag set
#[derive(Default)]
pub struct MockRepositoryGateway {
    description: Option<String>,
    is_public: bool,
    tags: Vec<Tag>,
    should_fail: bool,
    calls: AtomicUsize,
    updates: Mutex<Vec<Repository>>,
}

impl MockRepositoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<Repository> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryGateway for MockRepositoryGateway {
    async fn fetch_repository(&self, name: &RepositoryName) -> Result<Repository> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock repository gateway error");
        }
        Ok(Repository::new(
            name.clone(),
            self.description.clone(),
            self.is_public,
            self.tags.clone(),
        ))
    }

    async fn update_repository(&self, repository: &Repository) -> Result<()> {
        self.updates.lock().unwrap().push(repository.clone());
        Ok(())
    }
}
