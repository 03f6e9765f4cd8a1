//! Plaintext token wrapper.

use std::fmt;

/// A plaintext session or password-reset token.
///
/// Only ever held in memory between issuance and hand-off to the client;
/// `Debug` is redacted so the value cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a freshly generated token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the plaintext value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the plaintext value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken([redacted])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = SecretToken::new("abc123");
        assert_eq!(format!("{token:?}"), "SecretToken([redacted])");
        assert_eq!(token.expose(), "abc123");
    }
}
