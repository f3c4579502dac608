//! Admin model -> entity mapper

use affiliate_core::entities::AdminUser;
use affiliate_core::error::DomainError;

use super::parse_column;
use crate::models::AdminModel;

impl TryFrom<AdminModel> for AdminUser {
    type Error = DomainError;

    fn try_from(model: AdminModel) -> Result<Self, Self::Error> {
        Ok(AdminUser {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            role: parse_column("admin_users.role", &model.role)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
