use crate::repository_detail::domain::Tag;
use std::cmp::Ordering;

/// Number of tags shown on the detail page
pub const TAG_WINDOW_SIZE: usize = 5;

/// TagWindowPolicy reduces a repository's full tag set to the displayed list
///
/// Order:
/// 1. `last_modified`, newest first
/// 2. tag name ascending, so equal timestamps always come out the same way
///
/// The result is truncated to `TAG_WINDOW_SIZE` entries.
pub struct TagWindowPolicy;

impl TagWindowPolicy {
    /// Returns the displayed tag list for `tags`
    pub fn reduce(tags: &[Tag]) -> Vec<Tag> {
        Self::reduce_to(tags, TAG_WINDOW_SIZE)
    }

    /// Same as `reduce` with an explicit window size
    pub fn reduce_to(tags: &[Tag], window: usize) -> Vec<Tag> {
        let mut sorted: Vec<&Tag> = tags.iter().collect();
        sorted.sort_by(|a, b| Self::compare(a, b));
        sorted.into_iter().take(window).cloned().collect()
    }

    fn compare(a: &Tag, b: &Tag) -> Ordering {
        b.last_modified()
            .cmp(&a.last_modified())
            .then_with(|| a.name().cmp(b.name()))
    }
}
