//! PostgreSQL password reset repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;
use lenslocked_core::types::{PasswordResetId, UserId};
use lenslocked_entity::{PasswordReset, User};

use super::PasswordResetRepository;

/// Repository for the `password_resets` table.
#[derive(Debug, Clone)]
pub struct PgPasswordResetRepository {
    pool: PgPool,
}

impl PgPasswordResetRepository {
    /// Create a new password reset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row produced by joining a reset with its owner.
#[derive(Debug, FromRow)]
struct ResetWithUserRow {
    reset_id: PasswordResetId,
    user_id: UserId,
    token_hash: String,
    expires_at: DateTime<Utc>,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<ResetWithUserRow> for (PasswordReset, User) {
    fn from(row: ResetWithUserRow) -> Self {
        let reset = PasswordReset {
            id: row.reset_id,
            user_id: row.user_id,
            token_hash: row.token_hash,
            expires_at: row.expires_at,
            token: None,
        };
        let user = User {
            id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        };
        (reset, user)
    }
}

#[async_trait]
impl PasswordResetRepository for PgPasswordResetRepository {
    async fn upsert(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordReset> {
        sqlx::query_as::<_, PasswordReset>(
            "INSERT INTO password_resets (id, user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE \
             SET token_hash = EXCLUDED.token_hash, expires_at = EXCLUDED.expires_at \
             RETURNING id, user_id, token_hash, expires_at",
        )
        .bind(PasswordResetId::new())
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert password reset", e)
        })
    }

    async fn find_with_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<(PasswordReset, User)>> {
        let row = sqlx::query_as::<_, ResetWithUserRow>(
            "SELECT pr.id AS reset_id, pr.user_id, pr.token_hash, pr.expires_at, \
                    u.email, u.password_hash, u.created_at \
             FROM password_resets pr \
             JOIN users u ON u.id = pr.user_id \
             WHERE pr.token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find password reset", e)
        })?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: PasswordResetId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM password_resets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete password reset", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM password_resets WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to purge expired password resets",
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}
