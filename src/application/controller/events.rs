use crate::repository_detail::domain::ImageId;

/// Gateway operations whose results can be overtaken by a newer request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RepositoryLoad,
    SecurityLookup,
    BuildHistoryLoad,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::RepositoryLoad => write!(f, "repository load"),
            Operation::SecurityLookup => write!(f, "security lookup"),
            Operation::BuildHistoryLoad => write!(f, "build history load"),
        }
    }
}

/// Something the controller applied. Failures are reported here rather than
/// returned as `Err`, because they arrive asynchronously and leave the
/// existing state untouched.
#[derive(Debug)]
pub enum ControllerEvent {
    /// Repository replaced; `lookups` security lookups were issued for `tags` shown tags
    RepositoryLoaded { tags: usize, lookups: usize },
    RepositoryLoadFailed(anyhow::Error),
    SecurityLoaded { image_id: ImageId, tag_name: String },
    SecurityLookupFailed {
        image_id: ImageId,
        tag_name: String,
        error: anyhow::Error,
    },
    BuildHistoryLoaded { builds: usize },
    BuildHistoryLoadFailed(anyhow::Error),
    RepositorySaved,
    RepositorySaveFailed(anyhow::Error),
    /// A result answered a request that has since been superseded
    StaleResultDiscarded(Operation),
    /// A build notification arrived and a build-history reload was issued
    BuildNotified,
    PermissionChanged(bool),
    /// A broadcast source went away; its subscription was dropped
    SubscriptionClosed,
}

impl ControllerEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ControllerEvent::RepositoryLoadFailed(_)
                | ControllerEvent::SecurityLookupFailed { .. }
                | ControllerEvent::BuildHistoryLoadFailed(_)
                | ControllerEvent::RepositorySaveFailed(_)
        )
    }

    /// Whether the visible page content may have changed
    pub fn changes_view(&self) -> bool {
        matches!(
            self,
            ControllerEvent::RepositoryLoaded { .. }
                | ControllerEvent::SecurityLoaded { .. }
                | ControllerEvent::BuildHistoryLoaded { .. }
                | ControllerEvent::PermissionChanged(_)
        )
    }
}
