//! Sources of cryptographically secure random bytes.

use rand::TryRngCore;
use rand::rngs::OsRng;

use lenslocked_core::error::AppError;
use lenslocked_core::result::AppResult;

/// Fills buffers with secure random bytes.
///
/// A failure must be reported, never papered over with weaker randomness.
pub trait EntropySource: Send + Sync + std::fmt::Debug + 'static {
    /// Fill `buf` entirely or fail with `ErrorKind::RandomSource`.
    fn fill(&self, buf: &mut [u8]) -> AppResult<()>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> AppResult<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| AppError::random_source(format!("OS random source failed: {e}")))
    }
}
