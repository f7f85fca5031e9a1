//! CLI command definitions and dispatch.

pub mod browse;
pub mod download;
pub mod ls;
pub mod nav;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use datahub_browser::Session;
use datahub_client::{ResourceApi, RestClient};
use datahub_core::AppError;
use datahub_core::config::AppConfig;

use crate::output::OutputFormat;

/// DataHub: browse and organize a data-management server from the terminal
#[derive(Debug, Parser)]
#[command(name = "datahub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log in as this user before running the command (prompts for the
    /// password)
    #[arg(short, long)]
    pub login: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive hierarchy browser
    Browse(browse::BrowseArgs),
    /// List the children of a container
    Ls(ls::LsArgs),
    /// Show the navigation links
    Nav(nav::NavArgs),
    /// Print the download request for children of a container
    DownloadUrl(download::DownloadArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = Context::connect(config, self.login.as_deref()).await?;
        match &self.command {
            Commands::Browse(args) => browse::execute(args, &ctx).await,
            Commands::Ls(args) => ls::execute(args, &ctx, self.format).await,
            Commands::Nav(args) => nav::execute(args, &ctx, self.format).await,
            Commands::DownloadUrl(args) => download::execute(args, &ctx).await,
        }
    }
}

/// Everything a command needs: configuration, backend and session.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration
    pub config: AppConfig,
    /// REST backend
    pub api: Arc<dyn ResourceApi>,
    /// Session state
    pub session: Arc<Session>,
}

impl Context {
    /// Build the REST client and session, logging in when asked.
    pub async fn connect(config: AppConfig, login: Option<&str>) -> Result<Self, AppError> {
        let client = RestClient::from_config(&config.client)?;
        info!(api_root = %client.api_root(), "Using backend");
        let ctx = Self {
            api: Arc::new(client),
            session: Arc::new(Session::from_config(&config.ui)),
            config,
        };
        if let Some(login) = login {
            let password = prompt_password()?;
            ctx.log_in(login, &password).await?;
        }
        Ok(ctx)
    }

    /// Authenticate and make the user current.
    pub async fn log_in(&self, login: &str, password: &str) -> Result<(), AppError> {
        let (user, _token) = self.api.authenticate(login, password).await?;
        info!(login = %user.login, "Logged in");
        self.session.login(Some(user));
        Ok(())
    }

    /// End the session on the backend and locally.
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn log_out(&self) -> Result<(), AppError> {
        let result = self.api.logout().await;
        if let Err(e) = &result {
            warn!(error = %e, "Logout request failed; clearing local session");
        }
        self.session.login(None);
        result
    }

    /// Page size for child listings.
    pub fn page_size(&self) -> u64 {
        self.config.client.page_size
    }
}

/// Helper: prompt for a password without echo
pub fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
