//! # lenslocked-email
//!
//! Mail delivery backends implementing [`lenslocked_core::traits::Mailer`]
//! and the [`EmailService`] that composes the messages Lenslocked sends.

pub mod log;
pub mod outbox;
pub mod service;
pub mod smtp;

use std::sync::Arc;

use lenslocked_core::config::{EmailConfig, MailTransport};
use lenslocked_core::result::AppResult;
use lenslocked_core::traits::Mailer;

pub use log::LogMailer;
pub use outbox::OutboxMailer;
pub use service::EmailService;
pub use smtp::SmtpMailer;

/// Build the mailer selected by `config.transport`.
pub fn build_mailer(config: &EmailConfig) -> AppResult<Arc<dyn Mailer>> {
    Ok(match config.transport {
        MailTransport::Smtp => Arc::new(SmtpMailer::new(config)?),
        MailTransport::Log => Arc::new(LogMailer::new(&config.default_sender)),
    })
}
