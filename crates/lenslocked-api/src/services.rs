//! Capabilities the HTTP layer needs from the rest of the application.
//!
//! Handlers only see these traits. The concrete stores from
//! `lenslocked-auth` and the mail service from `lenslocked-email` implement
//! them below; tests can swap in anything else.

use async_trait::async_trait;

use lenslocked_auth::{PasswordResetStore, SessionStore, UserStore};
use lenslocked_core::result::AppResult;
use lenslocked_core::types::UserId;
use lenslocked_database::{DatabasePool, MemoryDatabase};
use lenslocked_entity::{PasswordReset, Session, User};

/// Session issuance and lookup.
#[async_trait]
pub trait SessionService: Send + Sync + 'static {
    /// Start a session for the user; the result carries the plaintext token.
    async fn create(&self, user_id: UserId) -> AppResult<Session>;
    /// Resolve a session token to its user.
    async fn user(&self, token: &str) -> AppResult<User>;
    /// Revoke the session holding `token`, if any.
    async fn delete(&self, token: &str) -> AppResult<()>;
}

/// Password reset issuance and redemption.
#[async_trait]
pub trait PasswordResetService: Send + Sync + 'static {
    /// Issue a reset token for the account with `email`.
    async fn create(&self, email: &str) -> AppResult<PasswordReset>;
    /// Redeem a reset token.
    async fn consume(&self, token: &str) -> AppResult<User>;
}

/// Account management.
#[async_trait]
pub trait UserService: Send + Sync + 'static {
    /// Register a new account.
    async fn create(&self, email: &str, password: &str) -> AppResult<User>;
    /// Check an email/password pair.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;
    /// Reject passwords that break the policy, before anything is spent on them.
    fn check_password(&self, password: &str) -> AppResult<()>;
    /// Replace a user's password.
    async fn update_password(&self, user_id: UserId, new_password: &str) -> AppResult<()>;
    /// Change a user's email address.
    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<()>;
}

/// Outgoing application mail.
#[async_trait]
pub trait EmailService: Send + Sync + 'static {
    /// Send the password reset link.
    async fn forgot_password(&self, to: &str, reset_url: &str) -> AppResult<()>;
}

/// Reachability of the backing store, for `/health`.
#[async_trait]
pub trait HealthService: Send + Sync + 'static {
    /// Succeeds when the store answers.
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl SessionService for SessionStore {
    async fn create(&self, user_id: UserId) -> AppResult<Session> {
        SessionStore::create(self, user_id).await
    }

    async fn user(&self, token: &str) -> AppResult<User> {
        SessionStore::user(self, token).await
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        SessionStore::delete(self, token).await
    }
}

#[async_trait]
impl PasswordResetService for PasswordResetStore {
    async fn create(&self, email: &str) -> AppResult<PasswordReset> {
        PasswordResetStore::create(self, email).await
    }

    async fn consume(&self, token: &str) -> AppResult<User> {
        PasswordResetStore::consume(self, token).await
    }
}

#[async_trait]
impl UserService for UserStore {
    async fn create(&self, email: &str, password: &str) -> AppResult<User> {
        UserStore::create(self, email, password).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        UserStore::authenticate(self, email, password).await
    }

    fn check_password(&self, password: &str) -> AppResult<()> {
        UserStore::check_password(self, password)
    }

    async fn update_password(&self, user_id: UserId, new_password: &str) -> AppResult<()> {
        UserStore::update_password(self, user_id, new_password).await
    }

    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<()> {
        UserStore::update_email(self, user_id, email).await
    }
}

#[async_trait]
impl EmailService for lenslocked_email::EmailService {
    async fn forgot_password(&self, to: &str, reset_url: &str) -> AppResult<()> {
        lenslocked_email::EmailService::forgot_password(self, to, reset_url).await
    }
}

#[async_trait]
impl HealthService for DatabasePool {
    async fn ping(&self) -> AppResult<()> {
        DatabasePool::ping(self).await
    }
}

#[async_trait]
impl HealthService for MemoryDatabase {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
