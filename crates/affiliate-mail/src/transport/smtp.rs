//! SMTP delivery through lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, instrument};

use affiliate_common::config::EmailConfig;

use crate::error::{MailError, MailResult};
use crate::message::OutgoingMail;
use crate::Mailer;

/// Upper bound on one delivery, kept well below the HTTP request timeout
pub const SMTP_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends mail through an SMTP relay
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    send_timeout: Duration,
}

impl SmtpMailer {
    /// Build the transport; no connection is made until the first send
    pub fn new(config: &EmailConfig) -> MailResult<Self> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| MailError::Delivery("EMAIL_HOST is not set".to_string()))?;

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailError::invalid_address(&config.from, e))?;

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else if is_local(host) {
            // Local catch-all servers (mailhog, mailpit) speak plain SMTP
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let mut builder = builder.port(config.port).timeout(Some(SMTP_SEND_TIMEOUT));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host, port = config.port, secure = config.secure, "SMTP mailer configured");

        Ok(Self {
            transport: builder.build(),
            from,
            send_timeout: SMTP_SEND_TIMEOUT,
        })
    }

    /// Override the delivery bound
    #[must_use]
    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }
}

fn is_local(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, mail), fields(to = %mail.to, subject = %mail.subject))]
    async fn send(&self, mail: OutgoingMail) -> MailResult<()> {
        let to = mail
            .to
            .parse::<Mailbox>()
            .map_err(|e| MailError::invalid_address(&mail.to, e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        // lettre only bounds the TCP connect; a relay that never greets would hang
        tokio::time::timeout(self.send_timeout, self.transport.send(message))
            .await
            .map_err(|_| MailError::Timeout(self.send_timeout))??;
        info!("Mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> EmailConfig {
        EmailConfig {
            host: Some(host.to_string()),
            ..EmailConfig::default()
        }
    }

    #[test]
    fn test_local_hosts() {
        assert!(is_local("localhost"));
        assert!(!is_local("smtp.example.com"));
    }

    #[tokio::test]
    async fn test_invalid_from_address() {
        let mut config = config("localhost");
        config.from = "not an address".to_string();
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(MailError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_host() {
        let config = EmailConfig::default();
        assert!(matches!(SmtpMailer::new(&config), Err(MailError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_silent_relay_times_out() {
        // Accepts connections and never sends the 220 greeting
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut config = config("127.0.0.1");
        config.port = port;
        let mailer = SmtpMailer::new(&config)
            .unwrap()
            .with_send_timeout(Duration::from_millis(300));

        let mail = OutgoingMail::new("ada@example.com", "Welcome", "Hello");
        let outcome = tokio::time::timeout(Duration::from_secs(5), mailer.send(mail))
            .await
            .expect("send must give up before the outer bound");
        assert!(matches!(outcome, Err(MailError::Timeout(_))));

        server.abort();
    }
}
