//! Password reset entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lenslocked_core::types::{PasswordResetId, UserId};

use crate::token::SecretToken;

/// A pending, single-use password reset.
///
/// At most one row exists per user. A row is destroyed when it is consumed
/// or replaced by a newer request; an expired row lingers until purged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PasswordReset {
    /// Unique reset identifier.
    pub id: PasswordResetId,
    /// The user allowed to reset their password.
    pub user_id: UserId,
    /// Base64-url SHA-256 digest of the reset token.
    pub token_hash: String,
    /// After this instant the token can no longer be consumed.
    pub expires_at: DateTime<Utc>,
    /// Plaintext token. Only present on the value returned at creation.
    #[sqlx(skip)]
    #[serde(skip)]
    pub token: Option<SecretToken>,
}

impl PasswordReset {
    /// Whether the reset has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reset_expiring_at(expires_at: DateTime<Utc>) -> PasswordReset {
        PasswordReset {
            id: PasswordResetId::new(),
            user_id: UserId::new(),
            token_hash: "hash".to_string(),
            expires_at,
            token: None,
        }
    }

    #[test]
    fn test_expiry_is_strictly_after() {
        let now = Utc::now();
        assert!(!reset_expiring_at(now).is_expired_at(now));
        assert!(reset_expiring_at(now - Duration::seconds(1)).is_expired_at(now));
        assert!(!reset_expiring_at(now + Duration::hours(1)).is_expired_at(now));
    }
}
