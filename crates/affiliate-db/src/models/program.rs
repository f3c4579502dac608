//! Affiliate program database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for affiliate_programs table
#[derive(Debug, Clone, FromRow)]
pub struct ProgramModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub commission_rate: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
