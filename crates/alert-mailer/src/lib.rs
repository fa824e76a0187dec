//! Alert composition and email delivery
//!
//! Formats alert records into a single plain-text message and delivers it
//! over authenticated SMTP. Configuration comes from the environment:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `EMAIL_USERNAME` | Sender account, also used as the From address |
//! | `EMAIL_PASSWORD` | Sender account secret |
//! | `EMAIL_TO` | Recipient address |
//! | `SMTP_HOST` | Relay host (default `smtp.gmail.com`) |
//! | `SMTP_PORT` | Submission port (default 587) |

pub mod compose;
pub mod smtp;

use std::time::Duration;

use thiserror::Error;

pub use compose::{compose_alert, compose_body, compose_subject, Alert};
pub use smtp::Mailer;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors raised while configuring or sending mail
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Email not configured: {0} is not set")]
    NotConfigured(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Invalid SMTP port: {0}")]
    InvalidPort(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// SMTP account and recipient settings
#[derive(Clone)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    pub to: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub timeout: Duration,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("to", &self.to)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MailConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, MailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(MailError::NotConfigured(key));

        let smtp_port = match get("SMTP_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| MailError::InvalidPort(port.clone()))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            username: require("EMAIL_USERNAME")?,
            password: require("EMAIL_PASSWORD")?,
            to: require("EMAIL_TO")?,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            timeout: DEFAULT_SMTP_TIMEOUT,
        })
    }
}
