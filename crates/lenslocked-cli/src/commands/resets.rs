//! Password reset maintenance commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use lenslocked_auth::{PasswordResetStore, TokenManager};
use lenslocked_core::error::AppError;
use lenslocked_database::repositories::{PgPasswordResetRepository, PgUserRepository};

use crate::output;

/// Arguments for reset commands
#[derive(Debug, Args)]
pub struct ResetsArgs {
    /// Reset subcommand
    #[command(subcommand)]
    pub command: ResetsCommand,
}

/// Reset subcommands
#[derive(Debug, Subcommand)]
pub enum ResetsCommand {
    /// Delete every expired password reset
    Purge,
}

/// Execute reset commands
pub async fn execute(args: &ResetsArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect(&config).await?;

    match &args.command {
        ResetsCommand::Purge => {
            let pool = db.pool().clone();
            let store = PasswordResetStore::new(
                Arc::new(PgPasswordResetRepository::new(pool.clone())),
                Arc::new(PgUserRepository::new(pool)),
                TokenManager::new(&config.auth),
                &config.auth,
            );
            let purged = store.purge_expired().await?;
            output::print_success(&format!("Purged {purged} expired password reset(s)."));
        }
    }

    db.close().await;
    Ok(())
}
