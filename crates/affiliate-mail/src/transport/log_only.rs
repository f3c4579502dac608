//! Log-only mailer for environments without SMTP

use async_trait::async_trait;
use tracing::info;

use crate::error::MailResult;
use crate::message::OutgoingMail;
use crate::Mailer;

/// Records that a message would have been sent
///
/// Bodies are never logged; approval mail carries a password.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> MailResult<()> {
        info!(to = %mail.to, subject = %mail.subject, "Mail not delivered (no SMTP host configured)");
        Ok(())
    }

    fn delivers(&self) -> bool {
        false
    }
}
