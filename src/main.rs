mod cli;

use cli::Args;
use registry_detail::adapters::outbound::console::StderrProgressReporter;
use registry_detail::adapters::outbound::network::RegistryApiClient;
use registry_detail::adapters::outbound::polling::BuildPoller;
use registry_detail::adapters::outbound::tally::VulnerabilityTally;
use registry_detail::application::controller::RepositoryDetailController;
use registry_detail::application::dto::{DetailRequest, OutputFormat};
use registry_detail::application::factories::FormatterFactory;
use registry_detail::application::use_cases::ShowRepositoryDetailUseCase;
use registry_detail::config::{
    discover_config, load_config_from_path, Overrides, Settings, TOKEN_ENV_VAR,
};
use registry_detail::ports::outbound::{BuildEventSource, PermissionBroadcast, Subscriptions};
use registry_detail::repository_detail::domain::RepositoryName;
use registry_detail::repository_detail::services::{BuildHistoryWindow, BUILD_HISTORY_WINDOW_SIZE};
use registry_detail::shared::error::{DetailError, ExitCode};
use registry_detail::shared::Result;
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Args::parse_args();
    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }
            eprintln!();

            classify_error(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

/// Diagnostics go to stderr; `RUST_LOG` selects the level (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn classify_error(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<DetailError>() {
        Some(DetailError::InvalidRepositoryName { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

async fn run(args: Args) -> Result<()> {
    let name = RepositoryName::parse(&args.repository)?;

    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(Path::new(path))?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let overrides = Overrides {
        api_url: args.api_url.clone(),
    };
    let settings = Settings::resolve(config, overrides, std::env::var(TOKEN_ENV_VAR).ok())?;
    info!(api_url = %settings.api_url, repository = %name, "starting");

    // Create adapters (Dependency Injection)
    let client = Arc::new(RegistryApiClient::new(
        settings.api_url.clone(),
        settings.auth_token.clone(),
    )?);
    let tally = VulnerabilityTally::new();
    let controller = RepositoryDetailController::new(
        Arc::clone(&client),
        Arc::clone(&client),
        Arc::clone(&client),
        tally.clone(),
    )
    .with_registry_url(settings.registry_url.clone())
    .with_history_window(BuildHistoryWindow::new(
        BUILD_HISTORY_WINDOW_SIZE,
        settings.utc_offset,
    ));

    let permission = PermissionBroadcast::new(settings.can_start_builds);
    let build_events = BuildEventSource::new();
    let mut subscriptions = Subscriptions::none().with_permission(&permission);
    if args.watch {
        subscriptions = subscriptions.with_build_events(&build_events);
    }

    let mut use_case = ShowRepositoryDetailUseCase::new(controller, StderrProgressReporter::new());
    let mut view = use_case
        .execute(DetailRequest::new(name.clone(), subscriptions))
        .await?;

    if let Some(description) = args.set_description {
        view = use_case.update_description(Some(description)).await?;
    }

    let colored = args.format == OutputFormat::Text && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(args.format, colored);
    println!("{}", formatter.format(&view)?);

    if tally.images() > 0 {
        eprintln!(
            "🛡️  {} vulnerabilit(ies) across {} scanned image(s)",
            tally.total(),
            tally.images()
        );
    }

    if !args.watch {
        return Ok(());
    }

    let poller = BuildPoller::new(
        Arc::clone(&client),
        name,
        build_events.clone(),
        settings.watch_interval,
        BUILD_HISTORY_WINDOW_SIZE,
    );
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let poll_task = tokio::spawn(poller.run(async {
        let _ = stop_rx.await;
    }));

    eprintln!("👀 Watching for build changes (Ctrl-C to stop)...");
    use_case
        .watch(
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
            |view| match formatter.format(view) {
                Ok(output) => println!("{}", output),
                Err(e) => warn!(error = %e, "failed to render detail view"),
            },
        )
        .await?;

    let _ = stop_tx.send(());
    poll_task.await?;

    Ok(())
}
