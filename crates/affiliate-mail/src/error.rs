//! Mail delivery errors

use thiserror::Error;

pub type MailResult<T> = Result<T, MailError>;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail delivery failed: {0}")]
    Delivery(String),

    #[error("SMTP relay did not answer within {0:?}")]
    Timeout(std::time::Duration),
}

impl MailError {
    pub(crate) fn invalid_address(address: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
