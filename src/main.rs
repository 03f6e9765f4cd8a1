//! Lenslocked server.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use lenslocked_core::config::AppConfig;
use lenslocked_core::error::AppError;
use lenslocked_database::DatabasePool;
use lenslocked_database::migration::{EMBEDDED, run_migrations};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `LENSLOCKED_ENV` overlay, and
/// `LENSLOCKED__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LENSLOCKED_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    run_migrations(db.pool(), &EMBEDDED).await?;

    lenslocked_api::run_server(config, db).await
}
