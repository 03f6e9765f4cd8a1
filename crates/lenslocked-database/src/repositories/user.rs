//! PostgreSQL user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;
use lenslocked_core::types::UserId;
use lenslocked_entity::User;
use lenslocked_entity::user::CreateUser;

use super::UserRepository;

/// Repository for user CRUD operations.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a failed write on `users`, turning the email unique index into a
/// `Conflict`.
fn map_write_error(e: sqlx::Error, message: &'static str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::conflict("email address is already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, message, e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(UserId::new())
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_email(&self, id: UserId, email: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
            .bind(id)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to update email"))?;
        Ok(result.rows_affected() > 0)
    }
}
