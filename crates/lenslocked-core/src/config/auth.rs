//! Token and credential configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest number of random bytes any issued token may carry.
pub const MIN_BYTES_PER_TOKEN: usize = 32;

/// Default lifetime of a password reset token in minutes.
pub const DEFAULT_RESET_DURATION_MINUTES: u64 = 60;

/// Longest accepted password reset lifetime in minutes (30 days).
pub const MAX_RESET_DURATION_MINUTES: u64 = 30 * 24 * 60;

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Random bytes per session/reset token. Values below
    /// [`MIN_BYTES_PER_TOKEN`] are raised to the floor.
    #[serde(default = "default_bytes_per_token")]
    pub bytes_per_token: usize,
    /// How long a password reset token stays valid, in minutes.
    /// Zero falls back to [`DEFAULT_RESET_DURATION_MINUTES`]; values above
    /// [`MAX_RESET_DURATION_MINUTES`] are rejected at load.
    #[serde(default = "default_reset_duration")]
    pub reset_duration_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Interval between expired password reset purges, in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub reset_cleanup_interval_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bytes_per_token: default_bytes_per_token(),
            reset_duration_minutes: default_reset_duration(),
            password_min_length: default_password_min(),
            reset_cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

impl AuthConfig {
    /// Reject settings that cannot be honoured at request time.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.reset_duration_minutes > MAX_RESET_DURATION_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.reset_duration_minutes must be at most {MAX_RESET_DURATION_MINUTES}, got {}",
                self.reset_duration_minutes
            )));
        }
        Ok(())
    }

    /// The reset token lifetime with the zero fallback applied, capped at
    /// [`MAX_RESET_DURATION_MINUTES`].
    pub fn reset_duration(&self) -> chrono::Duration {
        let minutes = match self.reset_duration_minutes {
            0 => DEFAULT_RESET_DURATION_MINUTES,
            m => m.min(MAX_RESET_DURATION_MINUTES),
        };
        i64::try_from(minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or_else(|| chrono::Duration::hours(1))
    }
}

fn default_bytes_per_token() -> usize {
    MIN_BYTES_PER_TOKEN
}

fn default_reset_duration() -> u64 {
    DEFAULT_RESET_DURATION_MINUTES
}

fn default_password_min() -> usize {
    8
}

fn default_cleanup_interval() -> u64 {
    15
}
