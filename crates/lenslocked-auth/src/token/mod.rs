//! Random token issuance and hashing.

pub mod entropy;
pub mod manager;

pub use entropy::{EntropySource, OsEntropy};
pub use manager::TokenManager;
