//! Password reset domain entities.

pub mod model;

pub use model::PasswordReset;
