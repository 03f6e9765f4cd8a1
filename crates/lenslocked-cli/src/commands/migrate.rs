//! Database migration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use lenslocked_core::error::AppError;
use lenslocked_database::migration::{EMBEDDED, run_migrations};

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// List the migrations bundled with this build
    List,
}

/// Migration display row
#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    /// Version
    version: i64,
    /// Description
    description: String,
}

/// Execute migration commands
pub async fn execute(
    args: &MigrateArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            let config = super::load_config(config_path)?;
            let db = super::connect(&config).await?;
            run_migrations(db.pool(), &EMBEDDED).await?;
            db.close().await;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::List => {
            let rows: Vec<MigrationRow> = EMBEDDED
                .iter()
                .map(|m| MigrationRow {
                    version: m.version,
                    description: m.description.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
