//! registry-detail - repository detail view-controller for container image registries
//!
//! This library loads a repository's tags, recent builds and per-image
//! vulnerability summaries from a registry API and keeps them as the state
//! of a repository detail page, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`repository_detail`): Tags, builds, security summaries and the
//!   policies that reduce and deduplicate them
//! - **Application Layer** (`application`): The detail controller, use case and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use registry_detail::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let client = Arc::new(RegistryApiClient::new("https://registry.example.com/api/v1", None)?);
//! let tally = VulnerabilityTally::new();
//!
//! // Create the controller and use case
//! let controller = RepositoryDetailController::new(
//!     Arc::clone(&client),
//!     Arc::clone(&client),
//!     client,
//!     tally.clone(),
//! );
//! let mut use_case = ShowRepositoryDetailUseCase::new(controller, StderrProgressReporter::new());
//!
//! // Execute
//! let name = RepositoryName::parse("acme/web")?;
//! let view = use_case.execute(DetailRequest::new(name, Subscriptions::none())).await?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&view)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod repository_detail;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::RegistryApiClient;
    pub use crate::adapters::outbound::polling::BuildPoller;
    pub use crate::adapters::outbound::tally::VulnerabilityTally;
    pub use crate::application::controller::{
        ControllerEvent, Operation, RepositoryDetailController,
    };
    pub use crate::application::dto::{DetailRequest, OutputFormat};
    pub use crate::application::read_models::{
        BuildView, DetailView, DetailViewBuilder, SecurityStatus, TagView,
    };
    pub use crate::application::use_cases::ShowRepositoryDetailUseCase;
    pub use crate::ports::inbound::RepositoryDetailPort;
    pub use crate::ports::outbound::{
        BuildEventSource, BuildHistoryGateway, BuildNotification, DetailFormatter,
        PermissionBroadcast, ProgressReporter, RepositoryGateway, SecurityCounter, Subscriptions,
        TagSecurityGateway,
    };
    pub use crate::repository_detail::domain::{
        Build, BuildPhase, BuildRecord, ImageId, Repository, RepositoryName, SecurityIndex,
        SecuritySummary, Tag,
    };
    pub use crate::repository_detail::policies::{ImageDedupPolicy, TagWindowPolicy};
    pub use crate::repository_detail::services::{
        BuildHistoryWindow, SelectionState, SortDirection, SortState,
    };
    pub use crate::shared::Result;
}
