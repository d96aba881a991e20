use crate::application::read_models::{DetailView, SecurityStatus, TagView};
use crate::ports::outbound::DetailFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// TextFormatter adapter rendering the detail page for a terminal
///
/// Colors are applied only when enabled, so the same layout can be written
/// to pipes and files.
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn security_cell(&self, tag: &TagView) -> String {
        match &tag.security {
            SecurityStatus::Pending => self.muted("pending"),
            SecurityStatus::Available {
                vulnerabilities: 0, ..
            } => {
                let text = "passed";
                if self.colored {
                    text.green().to_string()
                } else {
                    text.to_string()
                }
            }
            SecurityStatus::Available {
                vulnerabilities, ..
            } => {
                let text = format!("{} vulnerabilities", vulnerabilities);
                if self.colored {
                    text.red().to_string()
                } else {
                    text
                }
            }
        }
    }

    fn write_tags(&self, out: &mut String, view: &DetailView) -> std::fmt::Result {
        writeln!(out, "{}", self.heading("Tags"))?;
        if view.tags.is_empty() {
            return writeln!(out, "  {}", self.muted("(no tags)"));
        }

        let width = view.tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for tag in &view.tags {
            writeln!(
                out,
                "  {:<width$}  {}  {}  {}",
                tag.name,
                short_image_id(&tag.image_id),
                tag.last_modified.format("%Y-%m-%d %H:%M"),
                self.security_cell(tag),
                width = width
            )?;
        }
        Ok(())
    }

    fn write_builds(&self, out: &mut String, view: &DetailView) -> std::fmt::Result {
        writeln!(out, "{}", self.heading("Recent builds"))?;
        if view.builds.is_empty() {
            return writeln!(out, "  {}", self.muted("(no builds)"));
        }

        for build in &view.builds {
            let phase = if self.colored {
                build.phase.cyan().to_string()
            } else {
                build.phase.clone()
            };
            writeln!(out, "  {}  {}  {}", build.started, build.id, phase)?;
        }
        if !view.can_manage_builds {
            writeln!(out, "  {}", self.muted("(build details require build permission)"))?;
        }
        Ok(())
    }
}

impl DetailFormatter for TextFormatter {
    fn format(&self, view: &DetailView) -> Result<String> {
        let mut out = String::new();
        let visibility = if view.is_public { "public" } else { "private" };

        writeln!(out, "{} ({})", self.heading(&view.repository), visibility)?;
        if let Some(description) = &view.description {
            writeln!(out, "{}", description)?;
        }
        if let Some(command) = &view.docker_pull_command {
            writeln!(out, "\n  $ {}", command)?;
        }
        writeln!(out)?;
        self.write_tags(&mut out, view)?;
        writeln!(out)?;
        self.write_builds(&mut out, view)?;

        Ok(out)
    }
}

/// Image ids are long digests; twelve hex characters identify them on screen
fn short_image_id(image_id: &str) -> &str {
    let digest = image_id
        .split_once(':')
        .map(|(_, digest)| digest)
        .unwrap_or(image_id);
    digest.get(..12).unwrap_or(digest)
}
