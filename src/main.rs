//! flaky-health: a health-check endpoint that misbehaves on purpose.
//!
//! This is the application entry point. It initializes tracing, loads the
//! optional configuration file, sets up the Axum router, and serves until
//! SIGTERM or Ctrl-C.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flaky_health::config::{AppConfig, DEFAULT_LOG_FILTER};
use flaky_health::{create_router, http, AppError, AppState};

/// flaky-health: a /health endpoint with randomized fault injection
#[derive(Parser, Debug)]
#[command(name = "flaky-health", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "flaky_health=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Config errors happen before the subscriber exists
            if tracing::dispatcher::has_been_set() {
                tracing::error!(error = %e, "flaky-health stopped");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    // Load configuration before logging so the format is known
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let json = config.logging.is_json();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()?;

    tracing::info!(
        config = args.config.as_deref().unwrap_or("<defaults>"),
        latency_seconds = config.fault.latency_seconds,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);

    http::start_server(app, &config).await?;

    Ok(())
}
