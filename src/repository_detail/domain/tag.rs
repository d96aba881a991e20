use chrono::{DateTime, Utc};

/// Content address of an image. Several tags may point at the same image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Named pointer to an image within a repository. Never mutated after fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    image_id: ImageId,
    last_modified: DateTime<Utc>,
    size: Option<u64>,
}

impl Tag {
    pub fn new(
        name: impl Into<String>,
        image_id: ImageId,
        last_modified: DateTime<Utc>,
        size: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            image_id,
            last_modified,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_id(&self) -> &ImageId {
        &self.image_id
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }
}
