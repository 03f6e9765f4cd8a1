//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use lenslocked_core::config::AppConfig;

use crate::services::{
    EmailService, HealthService, PasswordResetService, SessionService, UserService,
};

/// Dependencies handed to every handler via `State<AppState>`.
///
/// Every field is an `Arc`, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session issuance and lookup.
    pub sessions: Arc<dyn SessionService>,
    /// Password reset issuance and redemption.
    pub password_resets: Arc<dyn PasswordResetService>,
    /// Account management.
    pub users: Arc<dyn UserService>,
    /// Outgoing mail.
    pub emails: Arc<dyn EmailService>,
    /// Database reachability, for `/health`.
    pub health: Arc<dyn HealthService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.config.server.base_url)
            .finish_non_exhaustive()
    }
}
