use clap::Parser;
use registry_detail::application::dto::OutputFormat;

/// Show the detail page of a container image repository
#[derive(Parser, Debug)]
#[command(name = "registry-detail")]
#[command(version)]
#[command(
    about = "Show tags, recent builds and vulnerability summaries of a container image repository",
    long_about = None
)]
pub struct Args {
    /// Repository to show, as <organization>/<repository>
    #[arg(value_name = "ORG/REPO")]
    pub repository: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a config file (defaults to ./registry-detail.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Base URL of the registry API (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Replace the repository description and save it before showing the page
    #[arg(long, value_name = "TEXT")]
    pub set_description: Option<String>,

    /// Keep running and re-render whenever the builds change, until Ctrl-C
    #[arg(short, long)]
    pub watch: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
