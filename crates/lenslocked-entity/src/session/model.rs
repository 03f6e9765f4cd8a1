//! Session entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lenslocked_core::types::{SessionId, UserId};

use crate::token::SecretToken;

/// The single live session of a user.
///
/// A user owns at most one row; signing in again overwrites `token_hash`,
/// which silently signs out every other browser.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The user this session belongs to.
    pub user_id: UserId,
    /// Base64-url SHA-256 digest of the session token.
    pub token_hash: String,
    /// Plaintext token. Only present on the value returned at creation.
    #[sqlx(skip)]
    #[serde(skip)]
    pub token: Option<SecretToken>,
}
