//! Password policy for new passwords.

use lenslocked_core::config::AuthConfig;
use lenslocked_core::error::AppError;
use lenslocked_core::result::AppResult;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        Ok(())
    }
}
