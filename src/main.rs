//! DataHub: terminal client for a data-management server.
//!
//! Main entry point that loads configuration, initializes logging and
//! dispatches the command line.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use datahub_cli::Cli;
use datahub_core::config::AppConfig;
use datahub_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config).await {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(cli_path: &str) -> Result<AppConfig, AppError> {
    let config_path = std::env::var("DATAHUB_CONFIG").unwrap_or_else(|_| cli_path.to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
