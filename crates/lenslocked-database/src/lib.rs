//! # lenslocked-database
//!
//! PostgreSQL connection management, the migration runner, and the
//! persistence seams for users, sessions, and password resets. Each seam
//! is a trait with a PostgreSQL implementation and an in-memory one.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use repositories::{PasswordResetRepository, SessionRepository, UserRepository};
