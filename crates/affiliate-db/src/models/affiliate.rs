//! Affiliate and credential database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliates table
#[derive(Debug, Clone, FromRow)]
pub struct AffiliateModel {
    pub id: i64,
    pub application_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub affiliate_code: String,
    pub commission_rate: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for affiliate_credentials table
#[derive(Debug, Clone, FromRow)]
pub struct CredentialModel {
    pub affiliate_id: i64,
    pub email: String,
    pub password_hash: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
