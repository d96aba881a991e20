//! Read models for CQRS-lite pattern
//!
//! View-optimized snapshots of the controller state, built on demand for
//! presentation.

pub mod detail_view;
pub mod detail_view_builder;

pub use detail_view::{BuildView, DetailView, SecurityStatus, TagView};
pub use detail_view_builder::DetailViewBuilder;
