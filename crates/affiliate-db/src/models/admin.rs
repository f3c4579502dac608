//! Admin user database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for admin_users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct AdminModel {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
