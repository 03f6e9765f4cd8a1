//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use lenslocked_auth::UserStore;
use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_database::repositories::PgUserRepository;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user account
    Create {
        /// Email address
        #[arg(long)]
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        UserCommand::Create { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Io, "Failed to read password", e)
                    })?,
            };

            let db = super::connect(&config).await?;
            let users = UserStore::new(
                Arc::new(PgUserRepository::new(db.pool().clone())),
                &config.auth,
            );
            let user = users.create(email, &password).await?;
            db.close().await;

            output::print_item(
                &UserRow {
                    id: user.id.to_string(),
                    email: user.email,
                    created_at: user.created_at.to_rfc3339(),
                },
                format,
            );
            output::print_success("User created.");
        }
    }

    Ok(())
}
