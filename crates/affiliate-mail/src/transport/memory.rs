//! In-memory mailer that keeps every message

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{MailError, MailResult};
use crate::message::OutgoingMail;
use crate::Mailer;

/// Captures messages instead of sending them
///
/// Clones share the same outbox, so a test can keep one handle and give
/// another to the service under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<OutgoingMail>>>,
    fail: bool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails after recording the attempt
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// All messages in send order
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.outbox.lock().clone()
    }

    /// Messages addressed to one recipient
    pub fn sent_to(&self, to: &str) -> Vec<OutgoingMail> {
        self.outbox
            .lock()
            .iter()
            .filter(|m| m.to.eq_ignore_ascii_case(to))
            .cloned()
            .collect()
    }

    /// Most recent value of a labeled line in mail to `to`
    pub fn last_field(&self, to: &str, label: &str) -> Option<String> {
        self.sent_to(to)
            .iter()
            .rev()
            .find_map(|m| m.field(label).map(str::to_string))
    }

    /// Password from the latest approval mail to `to`
    pub fn issued_password(&self, to: &str) -> Option<String> {
        self.last_field(to, "Password")
    }

    pub fn clear(&self) {
        self.outbox.lock().clear();
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, mail: OutgoingMail) -> MailResult<()> {
        self.outbox.lock().push(mail);
        if self.fail {
            return Err(MailError::Delivery("memory mailer configured to fail".to_string()));
        }
        Ok(())
    }

    fn delivers(&self) -> bool {
        !self.fail
    }
}
