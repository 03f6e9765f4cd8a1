//! Mailer that records messages in memory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lenslocked_core::result::AppResult;
use lenslocked_core::traits::{Mailer, OutgoingEmail};

/// Collects every message it is asked to send. Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl OutboxMailer {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }

    /// The most recent message, if any.
    pub async fn last(&self) -> Option<OutgoingEmail> {
        self.sent.lock().await.last().cloned()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}
