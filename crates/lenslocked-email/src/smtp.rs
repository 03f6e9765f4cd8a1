//! SMTP delivery through lettre's async tokio transport.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::info;

use lenslocked_core::config::EmailConfig;
use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;
use lenslocked_core::traits::{Mailer, OutgoingEmail};

/// Mailer that hands messages to an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    default_sender: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("default_sender", &self.default_sender)
            .finish()
    }
}

impl SmtpMailer {
    /// Build a transport from configuration. No connection is opened yet.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let host = config.host.as_str();
        let mut builder = if config.use_tls {
            let tls = TlsParameters::new(host.to_string()).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid SMTP TLS parameters", e)
            })?;
            // 465 is implicit TLS; every other port upgrades with STARTTLS.
            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay", e)
                    })?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay", e)
                    })?
                    .port(config.port)
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.port)
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            default_sender: config.default_sender.clone(),
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> AppResult<Message> {
        let from = email.from.as_deref().unwrap_or(&self.default_sender);
        Message::builder()
            .from(from.parse().map_err(|e| {
                AppError::with_source(ErrorKind::Validation, "Invalid sender address", e)
            })?)
            .to(email.to.parse().map_err(|e| {
                AppError::with_source(ErrorKind::Validation, "Invalid recipient address", e)
            })?)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.plaintext.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build email", e))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        let message = self.build_message(email)?;
        self.transport.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "SMTP delivery failed", e)
        })?;
        info!(subject = %email.subject, "Email sent via SMTP");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: None,
            to: to.to_string(),
            subject: "Hello".to_string(),
            plaintext: "text".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[test]
    fn test_mailer_creation_without_tls() {
        assert!(SmtpMailer::new(&EmailConfig::default()).is_ok());
    }

    #[test]
    fn test_mailer_creation_with_credentials() {
        let config = EmailConfig {
            port: 587,
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            ..EmailConfig::default()
        };
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[test]
    fn test_message_uses_default_sender() {
        let mailer = SmtpMailer::new(&EmailConfig::default()).unwrap();
        let message = mailer.build_message(&email("alice@example.com")).unwrap();
        let from = message.headers().get_raw("From").unwrap();
        assert!(from.contains("support@lenslocked.com"));
    }

    #[test]
    fn test_bad_recipient_is_validation_error() {
        let mailer = SmtpMailer::new(&EmailConfig::default()).unwrap();
        let err = mailer.build_message(&email("not an address")).unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
