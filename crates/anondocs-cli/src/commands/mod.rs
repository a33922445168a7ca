//! CLI command definitions and dispatch.

pub mod doc;
pub mod share;

use clap::{Parser, Subcommand};

use anondocs_core::config::AppConfig;
use anondocs_core::error::AppError;
use anondocs_service::{DocumentService, ShareService};
use anondocs_storage::Stores;

use crate::output::OutputFormat;

/// AnonDocs: write documents locally and share them as self-contained links
#[derive(Debug, Parser)]
#[command(name = "anondocs", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Document management
    Doc(doc::DocArgs),
    /// Share link management
    Share(share::ShareArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        tracing::debug!(command = ?self.command, config = %self.config, "Executing command");
        let services = Services::open(config).await?;
        match &self.command {
            Commands::Doc(args) => doc::execute(args, &services, self.format).await,
            Commands::Share(args) => share::execute(args, &services, config, self.format).await,
        }
    }
}

/// Services wired over the configured stores.
pub struct Services {
    /// Document service.
    pub documents: DocumentService,
    /// Share link service.
    pub shares: ShareService,
}

impl Services {
    /// Opens the stores and builds both services.
    pub async fn open(config: &AppConfig) -> Result<Self, AppError> {
        let stores = Stores::open(&config.storage).await?;
        Ok(Self {
            documents: DocumentService::new(stores.documents.clone()),
            shares: ShareService::from_config(&stores, &config.share)?,
        })
    }
}

/// Formats an instant for table output.
pub(crate) fn format_time(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
