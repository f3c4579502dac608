//! Application model -> entity mapper

use affiliate_core::entities::AffiliateApplication;
use affiliate_core::error::DomainError;

use super::parse_column;
use crate::models::ApplicationModel;

impl TryFrom<ApplicationModel> for AffiliateApplication {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        Ok(AffiliateApplication {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            social_media_handles: model.social_media_handles,
            audience_size: model.audience_size,
            audience_description: model.audience_description,
            motivation: model.motivation,
            status: parse_column("affiliate_applications.status", &model.status)?,
            review_notes: model.review_notes,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
