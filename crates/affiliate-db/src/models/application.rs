//! Affiliate application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub social_media_handles: Option<String>,
    pub audience_size: Option<String>,
    pub audience_description: Option<String>,
    pub motivation: Option<String>,
    pub status: String,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
