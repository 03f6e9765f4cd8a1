//! Start the Lenslocked server.

use clap::Args;

use lenslocked_core::error::AppError;
use lenslocked_database::migration::{EMBEDDED, run_migrations};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip running database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    let db = super::connect(&config).await?;
    if !args.no_migrate {
        run_migrations(db.pool(), &EMBEDDED).await?;
    }

    lenslocked_api::run_server(config, db).await
}
