pub mod build;
pub mod repository;
pub mod security;
pub mod tag;

pub use build::{Build, BuildPhase, BuildRecord};
pub use repository::{Repository, RepositoryName};
pub use security::{SecurityIndex, SecuritySummary};
pub use tag::{ImageId, Tag};
