//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password. Length policy is checked by the credential store.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signin request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Email change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    /// New email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Address of the account to reset.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Token from the emailed link.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// The new password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
