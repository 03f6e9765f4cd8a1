//! Session and password reset token issuance.
//!
//! A token is `bytes_per_token` random bytes, base64-url encoded (padded).
//! Only its hash is ever stored: SHA-256 over the token text, base64-url
//! encoded, always 44 characters.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use sha2::{Digest, Sha256};

use lenslocked_core::config::AuthConfig;
use lenslocked_core::config::auth::MIN_BYTES_PER_TOKEN;
use lenslocked_core::result::AppResult;
use lenslocked_entity::SecretToken;

use super::entropy::{EntropySource, OsEntropy};

/// Issues random tokens and hashes them for lookup. Holds no token state.
#[derive(Debug, Clone)]
pub struct TokenManager {
    bytes_per_token: usize,
    entropy: Arc<dyn EntropySource>,
}

impl TokenManager {
    /// Creates a manager backed by the OS random source.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_entropy(config.bytes_per_token, Arc::new(OsEntropy))
    }

    /// Creates a manager with an explicit random source. `bytes_per_token`
    /// below [`MIN_BYTES_PER_TOKEN`] is raised to it.
    pub fn with_entropy(bytes_per_token: usize, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            bytes_per_token: bytes_per_token.max(MIN_BYTES_PER_TOKEN),
            entropy,
        }
    }

    /// Number of random bytes behind every issued token.
    pub fn bytes_per_token(&self) -> usize {
        self.bytes_per_token
    }

    /// Generate a fresh token and its hash.
    ///
    /// Fails with `RandomSource` if the random source fails; never retried.
    pub fn issue(&self) -> AppResult<(SecretToken, String)> {
        let mut bytes = vec![0u8; self.bytes_per_token];
        self.entropy.fill(&mut bytes)?;
        let token = URL_SAFE.encode(&bytes);
        let hash = Self::hash(&token);
        Ok((SecretToken::new(token), hash))
    }

    /// Hash a token for storage or lookup.
    pub fn hash(token: &str) -> String {
        URL_SAFE.encode(Sha256::digest(token.as_bytes()))
    }
}
