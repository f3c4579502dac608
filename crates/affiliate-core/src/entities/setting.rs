//! System setting entity - key/value configuration editable at runtime

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl SystemSetting {
    /// Fallback commission percentage for approvals without an explicit rate
    pub const DEFAULT_COMMISSION_RATE: &'static str = "default_commission_rate";
}
