//! One live session per user, addressed by the hash of its token.

use std::sync::Arc;

use tracing::{debug, info};

use lenslocked_core::error::AppError;
use lenslocked_core::result::AppResult;
use lenslocked_core::types::UserId;
use lenslocked_database::{SessionRepository, UserRepository};
use lenslocked_entity::{Session, User};

use crate::token::TokenManager;

/// Issues, resolves, and revokes session tokens.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    tokens: TokenManager,
}

impl SessionStore {
    /// Creates a session store.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenManager,
    ) -> Self {
        Self {
            sessions,
            users,
            tokens,
        }
    }

    /// Start a session for `user_id`, replacing any previous one.
    ///
    /// The returned session carries the plaintext token; nothing else will.
    pub async fn create(&self, user_id: UserId) -> AppResult<Session> {
        let (token, token_hash) = self.tokens.issue()?;
        let mut session = self
            .sessions
            .upsert(user_id, &token_hash)
            .await
            .map_err(|e| e.context("create session"))?;
        session.token = Some(token);

        info!(user_id = %user_id, session_id = %session.id, "Session created");
        Ok(session)
    }

    /// Resolve a session token to its user.
    ///
    /// `NotFound` if no session has this token, including one that was
    /// replaced by a later sign-in.
    pub async fn user(&self, token: &str) -> AppResult<User> {
        let token_hash = TokenManager::hash(token);
        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await
            .map_err(|e| e.context("user"))?
            .ok_or_else(|| AppError::not_found("No session matches the token"))?;

        self.users
            .find_by_id(session.user_id)
            .await
            .map_err(|e| e.context("user"))?
            .ok_or_else(|| AppError::not_found("Session user no longer exists"))
    }

    /// Revoke the session holding `token`. Revoking an unknown token is
    /// not an error.
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        let token_hash = TokenManager::hash(token);
        let removed = self
            .sessions
            .delete_by_token_hash(&token_hash)
            .await
            .map_err(|e| e.context("delete session"))?;
        debug!(removed, "Session delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenslocked_core::config::AuthConfig;
    use lenslocked_core::error::ErrorKind;
    use lenslocked_database::MemoryDatabase;
    use lenslocked_entity::user::CreateUser;

    async fn setup() -> (MemoryDatabase, SessionStore, User) {
        let db = MemoryDatabase::new();
        let store = SessionStore::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            TokenManager::new(&AuthConfig::default()),
        );
        let user = UserRepository::create(
            &db,
            &CreateUser {
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        (db, store, user)
    }

    #[tokio::test]
    async fn test_create_then_resolve() {
        let (_db, store, alice) = setup().await;
        let session = store.create(alice.id).await.unwrap();
        let token = session.token.clone().unwrap();

        assert_eq!(session.token_hash, TokenManager::hash(token.expose()));
        let resolved = store.user(token.expose()).await.unwrap();
        assert_eq!(resolved.id, alice.id);
    }

    #[tokio::test]
    async fn test_second_create_invalidates_first() {
        let (db, store, alice) = setup().await;
        let first = store.create(alice.id).await.unwrap().token.unwrap();
        let second = store.create(alice.id).await.unwrap().token.unwrap();

        let err = store.user(first.expose()).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(store.user(second.expose()).await.unwrap().id, alice.id);
        assert_eq!(db.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let (_db, store, _alice) = setup().await;
        let err = store.user("never-issued").await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_session_without_user_is_not_found() {
        let (db, store, _alice) = setup().await;
        let orphan = "token-of-a-deleted-account";
        SessionRepository::upsert(&db, UserId::new(), &TokenManager::hash(orphan))
            .await
            .unwrap();

        let err = store.user(orphan).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert!(err.message.contains("no longer exists"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (db, store, alice) = setup().await;
        let token = store.create(alice.id).await.unwrap().token.unwrap();

        store.delete(token.expose()).await.unwrap();
        store.delete(token.expose()).await.unwrap();
        store.delete("never-issued").await.unwrap();

        assert!(store.user(token.expose()).await.is_err());
        assert_eq!(db.session_count().await, 0);
    }
}
