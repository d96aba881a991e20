use crate::repository_detail::domain::{ImageId, SecuritySummary};

/// SecurityCounter port receiving every security summary that lands in the
/// index, for site-wide vulnerability totals.
pub trait SecurityCounter: Send + Sync {
    fn record(&self, image_id: &ImageId, summary: &SecuritySummary);
}

/// Counter that drops everything, for callers without a tally
impl SecurityCounter for () {
    fn record(&self, _image_id: &ImageId, _summary: &SecuritySummary) {}
}
