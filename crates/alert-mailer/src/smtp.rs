//! SMTP delivery via lettre
//!
//! Sends a single plain-text message over a STARTTLS-upgraded connection,
//! authenticated with the sender account.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info, instrument};

use crate::{MailConfig, MailError};

/// Authenticated SMTP sender
pub struct Mailer {
    from: Mailbox,
    to: Mailbox,
    transport: SmtpTransport,
}

impl Mailer {
    /// Validate addresses and prepare the transport. No connection is made yet.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.username)?;
        let to = parse_mailbox(&config.to)?;

        let transport = SmtpTransport::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            from,
            to,
            transport,
        })
    }

    /// Build the plain-text message for a subject and body
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message, MailError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    #[instrument(skip_all, fields(to = %self.to, subject = %subject))]
    pub fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let message = self.build_message(subject, body)?;

        self.transport.send(&message).map_err(|e| {
            error!(error = %e, "SMTP send failed");
            MailError::Transport(e.to_string())
        })?;

        info!("Email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(username: &str, to: &str) -> MailConfig {
        MailConfig {
            username: username.to_string(),
            password: "app-password".to_string(),
            to: to.to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_rejects_malformed_sender() {
        let result = Mailer::new(&config("not an address", "ops@example.com"));
        assert!(matches!(result, Err(MailError::InvalidAddress(a)) if a == "not an address"));
    }

    #[test]
    fn test_rejects_malformed_recipient() {
        let result = Mailer::new(&config("watcher@example.com", "ops@"));
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[test]
    fn test_message_headers() {
        let mailer = Mailer::new(&config("watcher@example.com", "ops@example.com")).unwrap();
        let message = mailer
            .build_message("VIDP ATFM Alert", "PDF: a.pdf\n")
            .unwrap();

        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(recipients, vec!["ops@example.com".to_string()]);

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: watcher@example.com"));
        assert!(raw.contains("Subject: VIDP ATFM Alert"));
        assert!(raw.contains("Content-Type: text/plain"));
    }
}
