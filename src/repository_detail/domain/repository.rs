use super::tag::Tag;
use crate::shared::error::DetailError;
use crate::shared::Result;

/// Maximum length for organization and repository names
const MAX_NAME_SEGMENT_LENGTH: usize = 255;

/// Organization/repository pair identifying a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName {
    organization: String,
    name: String,
}

impl RepositoryName {
    pub fn new(organization: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let organization = organization.into();
        let name = name.into();
        Self::validate_segment(&organization, "organization", &organization, &name)?;
        Self::validate_segment(&name, "repository", &organization, &name)?;
        Ok(Self { organization, name })
    }

    /// Parses the qualified `<organization>/<repository>` form
    pub fn parse(qualified: &str) -> Result<Self> {
        let Some((organization, name)) = qualified.split_once('/') else {
            return Err(DetailError::InvalidRepositoryName {
                value: qualified.to_string(),
                reason: "missing '/' separator".to_string(),
            }
            .into());
        };
        Self::new(organization, name)
    }

    fn validate_segment(segment: &str, label: &str, organization: &str, name: &str) -> Result<()> {
        let invalid = |reason: String| DetailError::InvalidRepositoryName {
            value: format!("{}/{}", organization, name),
            reason,
        };

        if segment.is_empty() {
            return Err(invalid(format!("{} name cannot be empty", label)).into());
        }

        if segment.len() > MAX_NAME_SEGMENT_LENGTH {
            return Err(invalid(format!(
                "{} name is too long ({} bytes). Maximum allowed: {} bytes",
                label,
                segment.len(),
                MAX_NAME_SEGMENT_LENGTH
            ))
            .into());
        }

        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(invalid(format!(
                "{} name contains invalid characters. Only ASCII alphanumeric, hyphens, underscores and dots are allowed.",
                label
            ))
            .into());
        }

        Ok(())
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<organization>/<repository>`
    pub fn qualified(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.organization, self.name)
    }
}

/// Repository aggregate as returned by the registry.
///
/// Replaced wholesale on every fetch. The tag collection carries no order.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    name: RepositoryName,
    description: Option<String>,
    is_public: bool,
    tags: Vec<Tag>,
}

impl Repository {
    pub fn new(
        name: RepositoryName,
        description: Option<String>,
        is_public: bool,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            name,
            description,
            is_public,
            tags,
        }
    }

    pub fn name(&self) -> &RepositoryName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}
