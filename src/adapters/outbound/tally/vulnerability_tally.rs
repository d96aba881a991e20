use crate::ports::outbound::SecurityCounter;
use crate::repository_detail::domain::{ImageId, SecuritySummary};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// VulnerabilityTally keeps site-wide vulnerability counts per image.
///
/// Clones share the same table, so a handle kept by the caller sees what
/// the controller records. A newer summary for an image replaces the
/// earlier count instead of adding to it.
#[derive(Debug, Clone, Default)]
pub struct VulnerabilityTally {
    counts: Arc<DashMap<ImageId, usize>>,
}

impl VulnerabilityTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vulnerabilities recorded for one image
    pub fn count_for(&self, image_id: &ImageId) -> Option<usize> {
        self.counts.get(image_id).map(|entry| *entry.value())
    }

    /// Sum over all images recorded so far
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// Number of images with a recorded summary
    pub fn images(&self) -> usize {
        self.counts.len()
    }
}

impl SecurityCounter for VulnerabilityTally {
    fn record(&self, image_id: &ImageId, summary: &SecuritySummary) {
        let count = summary.vulnerability_count();
        debug!(image_id = %image_id, count, "recording vulnerability count");
        self.counts.insert(image_id.clone(), count);
    }
}
