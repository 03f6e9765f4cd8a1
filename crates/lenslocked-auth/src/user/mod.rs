//! User credential storage.

pub mod store;

pub use store::{UserStore, normalize_email};
