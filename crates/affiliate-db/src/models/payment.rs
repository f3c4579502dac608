//! Affiliate payment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_payments table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentModel {
    pub id: i64,
    pub affiliate_id: i64,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
