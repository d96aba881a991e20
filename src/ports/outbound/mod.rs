/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// Registry gateways, the vulnerability counter, formatting, progress
/// reporting and the broadcast sources the controller subscribes to.
pub mod build_history_gateway;
pub mod detail_formatter;
pub mod event_sources;
pub mod progress_reporter;
pub mod repository_gateway;
pub mod security_counter;
pub mod tag_security_gateway;

pub use build_history_gateway::BuildHistoryGateway;
pub use detail_formatter::DetailFormatter;
pub use event_sources::{BuildEventSource, BuildNotification, PermissionBroadcast, Subscriptions};
pub use progress_reporter::ProgressReporter;
pub use repository_gateway::RepositoryGateway;
pub use security_counter::SecurityCounter;
pub use tag_security_gateway::TagSecurityGateway;
