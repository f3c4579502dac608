//! Affiliate and credential model -> entity mappers

use affiliate_core::entities::{Affiliate, AffiliateCredential};
use affiliate_core::error::DomainError;

use super::parse_column;
use crate::models::{AffiliateModel, CredentialModel};

impl TryFrom<AffiliateModel> for Affiliate {
    type Error = DomainError;

    fn try_from(model: AffiliateModel) -> Result<Self, Self::Error> {
        Ok(Affiliate {
            id: model.id,
            application_id: model.application_id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            affiliate_code: model.affiliate_code,
            commission_rate: model.commission_rate,
            status: parse_column("affiliates.status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<CredentialModel> for AffiliateCredential {
    fn from(model: CredentialModel) -> Self {
        AffiliateCredential {
            affiliate_id: model.affiliate_id,
            email: model.email,
            password_hash: model.password_hash,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
        }
    }
}
