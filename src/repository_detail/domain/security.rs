use super::tag::ImageId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vulnerability scan result for one image.
///
/// The payload is kept as the registry sent it; the core only stores and
/// forwards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecuritySummary(serde_json::Value);

impl SecuritySummary {
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    /// Number of vulnerability entries anywhere in the payload.
    ///
    /// Scanner reports nest findings under features or layers; every array
    /// stored under a `vulnerabilities` key (any case) contributes its length.
    /// Lists nested inside those entries are not counted again.
    pub fn vulnerability_count(&self) -> usize {
        count_vulnerabilities(&self.0)
    }
}

fn count_vulnerabilities(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, child)| match child {
                serde_json::Value::Array(items) if key.eq_ignore_ascii_case("vulnerabilities") => {
                    items.len()
                }
                _ => count_vulnerabilities(child),
            })
            .sum(),
        serde_json::Value::Array(items) => items.iter().map(count_vulnerabilities).sum(),
        _ => 0,
    }
}

/// Image id -> latest security summary.
///
/// Entries survive repository reloads; entries for images that are no longer
/// listed are simply never read again.
#[derive(Debug, Clone, Default)]
pub struct SecurityIndex {
    entries: HashMap<ImageId, SecuritySummary>,
}

impl SecurityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `summary` for `image_id`, replacing any previous value
    pub fn insert(&mut self, image_id: ImageId, summary: SecuritySummary) {
        self.entries.insert(image_id, summary);
    }

    /// `None` means the lookup is pending or unknown, not failed
    pub fn get(&self, image_id: &ImageId) -> Option<&SecuritySummary> {
        self.entries.get(image_id)
    }

    pub fn contains(&self, image_id: &ImageId) -> bool {
        self.entries.contains_key(image_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
