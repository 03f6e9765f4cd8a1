//! CLI command definitions and dispatch.

pub mod migrate;
pub mod resets;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use lenslocked_core::config::AppConfig;
use lenslocked_core::error::AppError;
use lenslocked_database::DatabasePool;

use crate::output::OutputFormat;

/// Lenslocked administration
#[derive(Debug, Parser)]
#[command(name = "lenslocked", version, about, long_about = None)]
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
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Password reset maintenance
    Resets(resets::ResetsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config, self.format).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Resets(args) => resets::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file and `LENSLOCKED__*` variables
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path).map_err(|e| e.context("load config"))
}

/// Helper: open the database pool
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
