//! Expiring, single-use password reset tokens.
//!
//! A reset row goes `pending` on `create` and leaves that state by being
//! consumed, superseded by a newer `create`, or purged after expiry. An
//! expired row is never removed by `consume`.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use lenslocked_core::config::AuthConfig;
use lenslocked_core::error::AppError;
use lenslocked_core::result::AppResult;
use lenslocked_database::{PasswordResetRepository, UserRepository};
use lenslocked_entity::{PasswordReset, User};

use crate::token::TokenManager;
use crate::user::normalize_email;

/// Issues and redeems password reset tokens.
#[derive(Debug, Clone)]
pub struct PasswordResetStore {
    resets: Arc<dyn PasswordResetRepository>,
    users: Arc<dyn UserRepository>,
    tokens: TokenManager,
    duration: Duration,
}

impl PasswordResetStore {
    /// Creates a reset store with the configured token lifetime.
    pub fn new(
        resets: Arc<dyn PasswordResetRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenManager,
        config: &AuthConfig,
    ) -> Self {
        Self {
            resets,
            users,
            tokens,
            duration: config.reset_duration(),
        }
    }

    /// How long an issued token stays valid.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Issue a reset token for the account with `email`.
    ///
    /// Replaces any pending reset for that user. `NotFound` if no account
    /// has the address.
    pub async fn create(&self, email: &str) -> AppResult<PasswordReset> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| e.context("create password reset"))?
            .ok_or_else(|| AppError::not_found("No user with that email address"))?;

        let (token, token_hash) = self.tokens.issue()?;
        let expires_at = Utc::now()
            .checked_add_signed(self.duration)
            .ok_or_else(|| AppError::internal("Password reset expiry is out of range"))?;

        let mut reset = self
            .resets
            .upsert(user.id, &token_hash, expires_at)
            .await
            .map_err(|e| e.context("create password reset"))?;
        reset.token = Some(token);

        info!(user_id = %user.id, expires_at = %expires_at, "Password reset issued");
        Ok(reset)
    }

    /// Redeem a reset token, returning the user it was issued for.
    ///
    /// `NotFound` for an unknown or already used token. `Expired` for an
    /// expired one, which is left in place.
    pub async fn consume(&self, token: &str) -> AppResult<User> {
        let token_hash = TokenManager::hash(token);
        let (reset, user) = self
            .resets
            .find_with_user_by_token_hash(&token_hash)
            .await
            .map_err(|e| e.context("consume password reset"))?
            .ok_or_else(|| AppError::not_found("Invalid password reset token"))?;

        if reset.is_expired_at(Utc::now()) {
            warn!(user_id = %user.id, "Expired password reset token presented");
            return Err(AppError::expired("Password reset token has expired"));
        }

        let deleted = self
            .resets
            .delete(reset.id)
            .await
            .map_err(|e| e.context("consume password reset"))?;
        if !deleted {
            // A concurrent consume removed it first.
            return Err(AppError::not_found("Invalid password reset token"));
        }

        info!(user_id = %user.id, "Password reset consumed");
        Ok(user)
    }

    /// Delete every expired reset. Returns how many were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        self.resets
            .delete_expired(Utc::now())
            .await
            .map_err(|e| e.context("purge expired password resets"))
    }
}
