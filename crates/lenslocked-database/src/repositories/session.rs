//! PostgreSQL session repository.

use async_trait::async_trait;
use sqlx::PgPool;

use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;
use lenslocked_core::types::{SessionId, UserId};
use lenslocked_entity::Session;

use super::SessionRepository;

/// Repository for the `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<Session> {
        // One statement: the unique index on user_id serializes racing sign-ins.
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, token_hash) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET token_hash = EXCLUDED.token_hash \
             RETURNING id, user_id, token_hash",
        )
        .bind(SessionId::new())
        .bind(user_id)
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert session", e))
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token_hash FROM sessions WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
        })
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(result.rows_affected() > 0)
    }
}
