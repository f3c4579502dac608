//! Program and setting model -> entity mappers

use affiliate_core::entities::{AffiliateProgram, SystemSetting};
use affiliate_core::error::DomainError;

use super::parse_column;
use crate::models::{ProgramModel, SettingModel};

impl TryFrom<ProgramModel> for AffiliateProgram {
    type Error = DomainError;

    fn try_from(model: ProgramModel) -> Result<Self, Self::Error> {
        Ok(AffiliateProgram {
            id: model.id,
            name: model.name,
            description: model.description,
            commission_rate: model.commission_rate,
            status: parse_column("affiliate_programs.status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<SettingModel> for SystemSetting {
    fn from(model: SettingModel) -> Self {
        SystemSetting {
            key: model.key,
            value: model.value,
            updated_at: model.updated_at,
        }
    }
}
