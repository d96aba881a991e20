use crate::repository_detail::domain::{ImageId, Tag};
use std::collections::HashSet;

/// One security lookup to issue: the tag name addresses the registry API,
/// the image id keys the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityLookup {
    pub image_id: ImageId,
    pub tag_name: String,
}

/// ImageDedupPolicy collapses tags that share an image into a single lookup
///
/// The representative for an image is the first tag carrying it in the given
/// order. Applied to the displayed tag list, that is the most recently
/// modified tag of the image.
pub struct ImageDedupPolicy;

impl ImageDedupPolicy {
    /// Returns one lookup per distinct image id, in first-seen order
    pub fn lookups(tags: &[Tag]) -> Vec<SecurityLookup> {
        let mut seen: HashSet<&ImageId> = HashSet::new();
        tags.iter()
            .filter(|tag| seen.insert(tag.image_id()))
            .map(|tag| SecurityLookup {
                image_id: tag.image_id().clone(),
                tag_name: tag.name().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tag(name: &str, image: &str) -> Tag {
        Tag::new(
            name,
            ImageId::from(image),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            None,
        )
    }

    #[test]
    fn test_shared_image_produces_single_lookup() {
        let tags = vec![tag("v1", "sha:A"), tag("latest", "sha:B"), tag("v2", "sha:A")];
        let lookups = ImageDedupPolicy::lookups(&tags);

        assert_eq!(
            lookups,
            vec![
                SecurityLookup {
                    image_id: ImageId::from("sha:A"),
                    tag_name: "v1".to_string(),
                },
                SecurityLookup {
                    image_id: ImageId::from("sha:B"),
                    tag_name: "latest".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_distinct_images_each_get_a_lookup() {
        let tags = vec![tag("a", "sha:1"), tag("b", "sha:2"), tag("c", "sha:3")];
        assert_eq!(ImageDedupPolicy::lookups(&tags).len(), 3);
    }

    #[test]
    fn test_all_tags_on_one_image() {
        let tags: Vec<Tag> = (0..5).map(|i| tag(&format!("t{}", i), "sha:same")).collect();
        let lookups = ImageDedupPolicy::lookups(&tags);
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].tag_name, "t0");
    }

    #[test]
    fn test_empty_tag_list() {
        assert!(ImageDedupPolicy::lookups(&[]).is_empty());
    }
}
