//! Email delivery of composed alerts

use alert_mailer::{Alert, MailConfig, MailError, Mailer};
use tracing::{info, warn};

use crate::runner::{AlertSink, NotifyOutcome};

/// Sends alerts by email, or records why it cannot
pub enum EmailNotifier {
    Ready(Mailer),
    Disabled(String),
}

impl EmailNotifier {
    /// Missing or malformed settings disable email instead of failing.
    pub fn from_env() -> Self {
        Self::from_config(MailConfig::from_env())
    }

    pub fn from_config(config: Result<MailConfig, MailError>) -> Self {
        match config.and_then(|config| Mailer::new(&config)) {
            Ok(mailer) => Self::Ready(mailer),
            Err(e) => {
                warn!(error = %e, "Email disabled");
                Self::Disabled(e.to_string())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl AlertSink for EmailNotifier {
    fn deliver(&self, alert: &Alert) -> NotifyOutcome {
        match self {
            Self::Ready(mailer) => match mailer.send(&alert.subject, &alert.body) {
                Ok(()) => NotifyOutcome::Sent,
                Err(e) => NotifyOutcome::Failed(e.to_string()),
            },
            Self::Disabled(reason) => {
                info!(reason = %reason, "Email credentials not set, skipping email");
                NotifyOutcome::Skipped(reason.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> Alert {
        Alert {
            subject: "VIDP ATFM Alert — 1 file(s) with matches".to_string(),
            body: "PDF: a.pdf\nCallsigns found:\n - DAL123\n".to_string(),
        }
    }

    #[test]
    fn test_missing_config_disables_without_panicking() {
        let notifier = EmailNotifier::from_config(Err(MailError::NotConfigured("EMAIL_TO")));
        assert!(!notifier.is_enabled());

        match notifier.deliver(&alert()) {
            NotifyOutcome::Skipped(reason) => assert!(reason.contains("EMAIL_TO")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_address_disables() {
        let config = MailConfig::from_lookup(|key| match key {
            "EMAIL_USERNAME" => Some("watcher".to_string()),
            "EMAIL_PASSWORD" => Some("secret".to_string()),
            "EMAIL_TO" => Some("ops@example.com".to_string()),
            _ => None,
        });
        let notifier = EmailNotifier::from_config(config);
        assert!(matches!(notifier.deliver(&alert()), NotifyOutcome::Skipped(_)));
    }
}
