//! In-memory repositories.

pub mod store;

pub use store::MemoryDatabase;
