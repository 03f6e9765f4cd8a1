//! Mailer that logs instead of delivering.

use async_trait::async_trait;
use tracing::info;

use lenslocked_core::result::AppResult;
use lenslocked_core::traits::{Mailer, OutgoingEmail};

/// Development mailer: writes each message's envelope to the log.
///
/// Bodies are not logged since they may carry reset links.
#[derive(Debug, Clone)]
pub struct LogMailer {
    default_sender: String,
}

impl LogMailer {
    /// Creates a log mailer.
    pub fn new(default_sender: &str) -> Self {
        Self {
            default_sender: default_sender.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        info!(
            from = email.from.as_deref().unwrap_or(&self.default_sender),
            to = %email.to,
            subject = %email.subject,
            "Email delivery skipped (log transport)"
        );
        Ok(())
    }
}
