//! Application builder: wires stores into state and layers onto the router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use lenslocked_auth::{PasswordResetStore, ResetCleanup, SessionStore, TokenManager, UserStore};
use lenslocked_core::config::AppConfig;
use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::traits::Mailer;
use lenslocked_database::repositories::{
    PgPasswordResetRepository, PgSessionRepository, PgUserRepository,
};
use lenslocked_database::{
    DatabasePool, PasswordResetRepository, SessionRepository, UserRepository,
};

use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::services::HealthService;
use crate::state::AppState;

/// The concrete stores behind [`AppState`].
///
/// Kept separately so the server can also hand the reset store to the
/// background cleanup task.
#[derive(Debug, Clone)]
pub struct AppStores {
    /// Credential store.
    pub users: Arc<UserStore>,
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// Password reset store.
    pub password_resets: Arc<PasswordResetStore>,
    /// Mail composition.
    pub emails: Arc<lenslocked_email::EmailService>,
}

impl AppStores {
    /// Build every store from its repositories and configuration.
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        resets: Arc<dyn PasswordResetRepository>,
        mailer: Arc<dyn Mailer>,
        config: &AppConfig,
    ) -> Self {
        let tokens = TokenManager::new(&config.auth);
        Self {
            users: Arc::new(UserStore::new(Arc::clone(&users), &config.auth)),
            sessions: Arc::new(SessionStore::new(
                sessions,
                Arc::clone(&users),
                tokens.clone(),
            )),
            password_resets: Arc::new(PasswordResetStore::new(
                resets,
                users,
                tokens,
                &config.auth,
            )),
            emails: Arc::new(
                lenslocked_email::EmailService::new(mailer)
                    .with_sender(config.email.default_sender.clone()),
            ),
        }
    }

    /// Erase the concrete types into handler state.
    pub fn into_state(self, config: Arc<AppConfig>, health: Arc<dyn HealthService>) -> AppState {
        AppState {
            config,
            sessions: self.sessions,
            password_resets: self.password_resets,
            users: self.users,
            emails: self.emails,
            health,
        }
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds.max(1));

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Runs the Lenslocked server until a shutdown signal arrives.
///
/// Expects migrations to have been applied already.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    info!("Starting Lenslocked v{}", env!("CARGO_PKG_VERSION"));

    let pool = db.pool().clone();
    let mailer = lenslocked_email::build_mailer(&config.email)?;
    let stores = AppStores::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgPasswordResetRepository::new(pool)),
        mailer,
        &config,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let cleanup = ResetCleanup::new(Arc::clone(&stores.password_resets), &config.auth);
    let cleanup_handle = tokio::spawn(async move { cleanup.run(shutdown_rx).await });

    let addr = config.server.bind_address();
    let config = Arc::new(config);
    let app = build_app(stores.into_state(config, Arc::new(db.clone())));

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Io, format!("Failed to bind {addr}"), e)
    })?;
    info!(addr = %addr, "Lenslocked server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutdown signal received, starting graceful shutdown");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Io, "Server error", e))?;

    if tokio::time::timeout(Duration::from_secs(10), cleanup_handle)
        .await
        .is_err()
    {
        error!("Password reset cleanup did not stop in time");
    }

    db.close().await;
    info!("Lenslocked server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
