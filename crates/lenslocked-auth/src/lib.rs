//! # lenslocked-auth
//!
//! Credential and session handling for Lenslocked.
//!
//! ## Modules
//!
//! - `token` — secure random tokens and their SHA-256 lookup hashes
//! - `password` — Argon2id password hashing and policy enforcement
//! - `user` — account creation, authentication, credential updates
//! - `session` — one live session per user, resolved from a cookie token
//! - `reset` — expiring single-use password reset tokens and their cleanup

pub mod password;
pub mod reset;
pub mod session;
pub mod token;
pub mod user;

pub use password::{PasswordHasher, PasswordValidator};
pub use reset::{PasswordResetStore, ResetCleanup};
pub use session::SessionStore;
pub use token::{EntropySource, OsEntropy, TokenManager};
pub use user::UserStore;
