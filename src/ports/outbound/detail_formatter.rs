use crate::application::read_models::DetailView;
use crate::shared::Result;

/// DetailFormatter port for rendering a detail view snapshot
///
/// Implementations produce the complete output document for one
/// snapshot; presenting it is left to the caller.
pub trait DetailFormatter {
    fn format(&self, view: &DetailView) -> Result<String>;
}
