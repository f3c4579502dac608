//! System setting database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for system_settings table
#[derive(Debug, Clone, FromRow)]
pub struct SettingModel {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
