//! Outgoing mail for the affiliate program
//!
//! Services depend on the [`Mailer`] trait only. [`mailer_from_config`] picks
//! SMTP delivery when a relay host is configured and falls back to logging.

pub mod error;
pub mod message;
pub mod templates;
pub mod transport;

use std::sync::Arc;

use affiliate_common::config::EmailConfig;
use async_trait::async_trait;

pub use error::{MailError, MailResult};
pub use message::OutgoingMail;
pub use templates::ApprovalNotice;
pub use transport::{LogMailer, MemoryMailer, SmtpMailer};

/// Delivers one rendered message
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> MailResult<()>;

    /// Whether messages actually leave the process
    fn delivers(&self) -> bool {
        true
    }
}

/// Build the mailer for an email configuration
pub fn mailer_from_config(config: &EmailConfig) -> MailResult<Arc<dyn Mailer>> {
    if config.is_configured() {
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        tracing::warn!("EMAIL_HOST is not set; outgoing mail will only be logged");
        Ok(Arc::new(LogMailer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_email_falls_back_to_log() {
        let mailer = mailer_from_config(&EmailConfig::default()).unwrap();
        assert!(!mailer.delivers());
    }

    #[tokio::test]
    async fn test_configured_email_uses_smtp() {
        let config = EmailConfig {
            host: Some("smtp.example.com".to_string()),
            username: Some("mailer".to_string()),
            password: Some("secret".to_string()),
            ..EmailConfig::default()
        };
        let mailer = mailer_from_config(&config).unwrap();
        assert!(mailer.delivers());
    }
}
