//! Finwise terminal client
//!
//! Creates budgets through the two-step wizard and lists them.

mod commands;
mod interactive;
mod prompt;
mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use finwise_client::{ApiClient, ApiClientConfig, SessionToken};
use finwise_core::wizard::Navigate;
use finwise_shared::AppConfig;

use crate::commands::Commands;

#[derive(Parser)]
#[command(
    name = "finwise",
    version,
    about = "Create and review budgets from the terminal"
)]
struct Cli {
    /// Backend base URL (overrides FINWISE__API__BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides FINWISE__API__TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tokens = Arc::new(SessionToken::new(config.api.token.clone()));
    if !tokens.is_present() {
        warn!("No API token configured; requests will be rejected");
    }

    let session_expired = Arc::new(AtomicBool::new(false));
    let flag = session_expired.clone();
    let client = ApiClient::new(&ApiClientConfig::from(&config.api), tokens)?
        .with_unauthorized_hook(Arc::new(move || flag.store(true, Ordering::SeqCst)));
    info!(base_url = %client.base_url(), "Using backend");

    let outcome = commands::run(cli.command, &client).await;

    if session_expired.load(Ordering::SeqCst) || matches!(outcome, Ok(Navigate::Login)) {
        eprintln!("Your session has expired. Log in again and update FINWISE__API__TOKEN.");
        return Ok(ExitCode::from(2));
    }
    outcome?;
    Ok(ExitCode::SUCCESS)
}
