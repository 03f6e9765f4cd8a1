//! # lenslocked-entity
//!
//! Row models for Lenslocked. Every struct in this crate represents a
//! database table row or a domain value object; table rows additionally
//! derive `sqlx::FromRow`.

pub mod password_reset;
pub mod session;
pub mod token;
pub mod user;

pub use password_reset::PasswordReset;
pub use session::Session;
pub use token::SecretToken;
pub use user::User;
