//! Outgoing mail configuration.

use serde::{Deserialize, Serialize};

/// How outgoing mail is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MailTransport {
    /// Deliver through the configured SMTP relay.
    Smtp,
    /// Write messages to the log instead of sending them.
    #[default]
    Log,
}

/// SMTP and sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Delivery mechanism.
    #[serde(default)]
    pub transport: MailTransport,
    /// SMTP relay host.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether to negotiate TLS with the relay.
    #[serde(default)]
    pub use_tls: bool,
    /// `From` address used when a message does not set one.
    #[serde(default = "default_sender")]
    pub default_sender: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            use_tls: false,
            default_sender: default_sender(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1025
}

fn default_sender() -> String {
    "support@lenslocked.com".to_string()
}
