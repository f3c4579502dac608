//! Referral database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_referrals table
#[derive(Debug, Clone, FromRow)]
pub struct ReferralModel {
    pub id: i64,
    pub affiliate_id: i64,
    pub referred_user_id: i64,
    pub status: String,
    pub sale_amount: f64,
    pub commission_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Referral row left-joined with the platform users table
#[derive(Debug, Clone, FromRow)]
pub struct ReferralWithUserModel {
    #[sqlx(flatten)]
    pub referral: ReferralModel,
    pub referred_user_name: Option<String>,
    pub referred_user_email: Option<String>,
}

/// `GROUP BY status` row with a count and a commission sum
#[derive(Debug, Clone, FromRow)]
pub struct StatusAggregateRow {
    pub status: String,
    pub count: i64,
    pub commission: f64,
}
