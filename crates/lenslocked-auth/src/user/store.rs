//! Account creation, authentication, and credential updates.

use std::sync::Arc;

use tracing::info;

use lenslocked_core::config::AuthConfig;
use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;
use lenslocked_core::types::UserId;
use lenslocked_database::UserRepository;
use lenslocked_entity::User;
use lenslocked_entity::user::CreateUser;

use crate::password::{PasswordHasher, PasswordValidator};

/// Message for every failed sign-in, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Lower-case and trim an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Manages user accounts and their password hashes.
#[derive(Debug, Clone)]
pub struct UserStore {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl UserStore {
    /// Creates a user store.
    pub fn new(repo: Arc<dyn UserRepository>, config: &AuthConfig) -> Self {
        Self {
            repo,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
        }
    }

    /// Register a new account. A taken email fails with `Conflict`.
    pub async fn create(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::validation("Email must not be blank"));
        }
        self.validator.validate(password)?;
        let password_hash = self.hasher.hash(password)?;

        let user = self
            .repo
            .create(&CreateUser {
                email,
                password_hash,
            })
            .await
            .map_err(|e| e.context("create user"))?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Check `password` against the policy without storing anything.
    pub fn check_password(&self, password: &str) -> AppResult<()> {
        self.validator.validate(password)
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password give the same `Authentication` error.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }
        Ok(user)
    }

    /// Load a user by id.
    pub async fn by_id(&self, user_id: UserId) -> AppResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Replace the user's password after checking the policy.
    pub async fn update_password(&self, user_id: UserId, new_password: &str) -> AppResult<()> {
        self.validator.validate(new_password)?;
        let hash = self.hasher.hash(new_password)?;
        if !self.repo.update_password_hash(user_id, &hash).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        info!(user_id = %user_id, "Password updated");
        Ok(())
    }

    /// Change the user's email address.
    pub async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::validation("Email must not be blank"));
        }
        match self.repo.update_email(user_id, &email).await {
            Ok(true) => {
                info!(user_id = %user_id, "Email updated");
                Ok(())
            }
            Ok(false) => Err(AppError::not_found(format!("User {user_id} not found"))),
            Err(e) if e.is(ErrorKind::Conflict) => Err(e),
            Err(e) => Err(e.context("update email")),
        }
    }
}
