//! Database migration runner.
//!
//! The migration set is always handed in by the caller. Nothing here keeps
//! process-wide state, so two runs against different pools or different
//! migration sets never observe each other.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use lenslocked_core::error::{AppError, ErrorKind};

/// Migrations shipped with this crate, embedded at compile time.
pub static EMBEDDED: Migrator = sqlx::migrate!("../../migrations");

/// Run all pending migrations from `migrator` against `pool`.
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> Result<(), AppError> {
    info!(
        available = migrator.iter().count(),
        "Running database migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}
