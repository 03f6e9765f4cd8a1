//! In-memory implementation of every repository trait.
//!
//! Used by the test suites and by `lenslocked-server` when no database is
//! needed. A single write lock guards all tables, so each operation is
//! atomic in the same way the single-statement SQL upserts are.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use lenslocked_core::error::AppError;
use lenslocked_core::result::AppResult;
use lenslocked_core::types::{PasswordResetId, SessionId, UserId};
use lenslocked_entity::user::CreateUser;
use lenslocked_entity::{PasswordReset, Session, User};

use crate::repositories::{PasswordResetRepository, SessionRepository, UserRepository};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// Keyed by owner, mirroring the `user_id` unique index.
    sessions: HashMap<UserId, Session>,
    /// Keyed by owner, mirroring the `user_id` unique index.
    resets: HashMap<UserId, PasswordReset>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Shared in-memory tables. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }

    /// Number of stored password resets, expired ones included.
    pub async fn reset_count(&self) -> usize {
        self.tables.read().await.resets.len()
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&data.email, None) {
            return Err(AppError::conflict("email address is already in use"));
        }
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_password_hash(&self, id: UserId, password_hash: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                true
            }
            None => false,
        })
    }

    async fn update_email(&self, id: UserId, email: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(email, Some(id)) {
            return Err(AppError::conflict("email address is already in use"));
        }
        Ok(match tables.users.get_mut(&id) {
            Some(user) => {
                user.email = email.to_string();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl SessionRepository for MemoryDatabase {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<Session> {
        let mut tables = self.tables.write().await;
        let session = tables
            .sessions
            .entry(user_id)
            .and_modify(|s| s.token_hash = token_hash.to_string())
            .or_insert_with(|| Session {
                id: SessionId::new(),
                user_id,
                token_hash: token_hash.to_string(),
                token: None,
            });
        Ok(session.clone())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .find(|s| s.token_hash == token_hash)
            .cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.token_hash != token_hash);
        Ok(tables.sessions.len() < before)
    }
}

#[async_trait]
impl PasswordResetRepository for MemoryDatabase {
    async fn upsert(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordReset> {
        let mut tables = self.tables.write().await;
        let reset = tables
            .resets
            .entry(user_id)
            .and_modify(|r| {
                r.token_hash = token_hash.to_string();
                r.expires_at = expires_at;
            })
            .or_insert_with(|| PasswordReset {
                id: PasswordResetId::new(),
                user_id,
                token_hash: token_hash.to_string(),
                expires_at,
                token: None,
            });
        Ok(reset.clone())
    }

    async fn find_with_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<(PasswordReset, User)>> {
        let tables = self.tables.read().await;
        let found = tables
            .resets
            .values()
            .find(|r| r.token_hash == token_hash)
            .and_then(|r| {
                tables
                    .users
                    .get(&r.user_id)
                    .map(|u| (r.clone(), u.clone()))
            });
        Ok(found)
    }

    async fn delete(&self, id: PasswordResetId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.resets.len();
        tables.resets.retain(|_, r| r.id != id);
        Ok(tables.resets.len() < before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.resets.len();
        tables.resets.retain(|_, r| r.expires_at >= now);
        Ok((before - tables.resets.len()) as u64)
    }
}
