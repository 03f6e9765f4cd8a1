//! Persistence seams for users, sessions, and password resets.
//!
//! Each trait is implemented by a PostgreSQL repository in this module and
//! by [`crate::memory::MemoryDatabase`]. Overwrite-by-user semantics are the
//! repository's job: implementations must make `upsert` a single atomic
//! step so concurrent sign-ins for one user never leave two rows.

pub mod password_reset;
pub mod session;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lenslocked_core::result::AppResult;
use lenslocked_core::types::{PasswordResetId, UserId};
use lenslocked_entity::user::CreateUser;
use lenslocked_entity::{PasswordReset, Session, User};

pub use password_reset::PgPasswordResetRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

/// Storage for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace the stored password hash. Returns `false` if no such user.
    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<bool>;

    /// Replace the email address. Fails with `Conflict` when it is taken.
    async fn update_email(&self, id: UserId, email: &str) -> AppResult<bool>;
}

/// Storage for the one live session per user.
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a session for `user_id`, or overwrite the hash of the
    /// existing one.
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<Session>;

    /// Find the session whose token hashes to `token_hash`.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>>;

    /// Delete the session with `token_hash`. Returns `false` if none matched.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool>;
}

/// Storage for the one pending password reset per user.
#[async_trait]
pub trait PasswordResetRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a reset for `user_id`, or overwrite the hash and expiry of
    /// the pending one.
    async fn upsert(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordReset>;

    /// Find the reset whose token hashes to `token_hash`, together with
    /// its owner.
    async fn find_with_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<(PasswordReset, User)>>;

    /// Delete a reset by id. Returns `false` if it was already gone.
    async fn delete(&self, id: PasswordResetId) -> AppResult<bool>;

    /// Delete every reset that expired before `now`. Returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
