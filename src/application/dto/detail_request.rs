use crate::ports::outbound::Subscriptions;
use crate::repository_detail::domain::RepositoryName;

/// DetailRequest - request DTO for the repository detail use case
#[derive(Debug)]
pub struct DetailRequest {
    /// Repository to show
    pub repository: RepositoryName,
    /// Broadcast receivers the controller keeps while active
    pub subscriptions: Subscriptions,
}

impl DetailRequest {
    pub fn new(repository: RepositoryName, subscriptions: Subscriptions) -> Self {
        Self {
            repository,
            subscriptions,
        }
    }
}
