/// Mock implementations for testing
mod mock_build_history_gateway;
mod mock_progress_reporter;
mod mock_repository_gateway;
mod mock_tag_security_gateway;

pub use mock_build_history_gateway::MockBuildHistoryGateway;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_repository_gateway::MockRepositoryGateway;
pub use mock_tag_security_gateway::MockTagSecurityGateway;
