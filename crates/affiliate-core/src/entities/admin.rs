//! Admin user entity

use chrono::{DateTime, Utc};

use crate::value_objects::AdminRole;

/// Administrator account (password hash is fetched separately)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    #[inline]
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }
}

/// Admin row to insert (seeding or creation by a super admin)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminUser {
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}
