//! Wristband CLI - Entry point.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wristband_cli::{
    config::Config,
    render::{Outcome, CONNECTION_ERROR},
    Cli,
};
use wristband_client::RallyClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    init_logging(&config.log.level);

    let client = match config.api.timeout {
        Some(timeout) => RallyClient::with_timeout(&config.api.base_url, timeout),
        None => RallyClient::new(&config.api.base_url),
    };
    let client = match client {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create rally client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(base_url = %client.base_url(), "Using rally server");

    match cli.command.run(&client).await {
        Ok(rendered) => {
            println!("{}", rendered.text);
            match rendered.outcome {
                Outcome::Accepted => ExitCode::SUCCESS,
                Outcome::Rejected => ExitCode::from(2),
            }
        }
        Err(e) => {
            error!("Request failed: {}", e);
            eprintln!("{}", CONNECTION_ERROR);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so rendered replies stay alone on stdout.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
