//! Password reset tokens.

pub mod cleanup;
pub mod store;

pub use cleanup::ResetCleanup;
pub use store::PasswordResetStore;
