//! Composition of the messages Lenslocked sends.

use std::sync::Arc;

use tracing::info;

use lenslocked_core::result::AppResult;
use lenslocked_core::traits::{Mailer, OutgoingEmail};

/// Subject of the forgot-password message.
pub const FORGOT_PASSWORD_SUBJECT: &str = "Reset your password";

/// Builds and sends application emails through a [`Mailer`].
#[derive(Debug, Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    default_sender: Option<String>,
}

impl EmailService {
    /// Creates a service. Messages use the mailer's default sender.
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            mailer,
            default_sender: None,
        }
    }

    /// Override the `From` address of every message.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.default_sender = Some(sender.into());
        self
    }

    /// Send `email`, filling in the sender when unset.
    pub async fn send(&self, mut email: OutgoingEmail) -> AppResult<()> {
        if email.from.is_none() {
            email.from = self.default_sender.clone();
        }
        self.mailer.send(&email).await
    }

    /// Send the password reset link to `to`.
    pub async fn forgot_password(&self, to: &str, reset_url: &str) -> AppResult<()> {
        let email = OutgoingEmail {
            from: None,
            to: to.to_string(),
            subject: FORGOT_PASSWORD_SUBJECT.to_string(),
            plaintext: format!(
                "To reset your password, please visit the following link: {reset_url}"
            ),
            html: format!(
                r#"<p>To reset your password, please visit the following link: <a href="{reset_url}">{reset_url}</a></p>"#
            ),
        };
        self.send(email).await?;
        info!(to = %to, "Forgot password email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutboxMailer;

    #[tokio::test]
    async fn test_forgot_password_message() {
        let outbox = OutboxMailer::new();
        let service = EmailService::new(Arc::new(outbox.clone()));

        let url = "http://localhost:3000/reset-pw?token=abc";
        service
            .forgot_password("alice@example.com", url)
            .await
            .unwrap();

        let sent = outbox.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(sent[0].subject, FORGOT_PASSWORD_SUBJECT);
        assert!(sent[0].plaintext.contains(url));
        assert!(sent[0].html.contains(url));
        assert_eq!(sent[0].from, None);
    }

    #[tokio::test]
    async fn test_sender_override() {
        let outbox = OutboxMailer::new();
        let service = EmailService::new(Arc::new(outbox.clone())).with_sender("ops@lenslocked.com");

        service
            .forgot_password("alice@example.com", "http://x/reset-pw?token=t")
            .await
            .unwrap();

        let last = outbox.last().await.unwrap();
        assert_eq!(last.from.as_deref(), Some("ops@lenslocked.com"));
    }
}
