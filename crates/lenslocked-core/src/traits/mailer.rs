//! Outgoing mail delivery trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully composed message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Sender address. `None` means the mailer's default sender.
    pub from: Option<String>,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub plaintext: String,
    /// HTML body.
    pub html: String,
}

/// Trait for mail delivery backends (SMTP relay, log sink, test outbox).
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a single message.
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()>;
}
