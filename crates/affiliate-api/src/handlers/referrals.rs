//! Referral handlers

use affiliate_service::dto::{ReferralResponse, TrackReferralRequest, UpdateReferralStatusRequest};
use affiliate_service::ReferralService;
use axum::{extract::State, Json};

use crate::extractors::{AdminAuth, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Record a signup made through an affiliate code
///
/// POST /api/affiliates/referrals/track
pub async fn track_referral(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TrackReferralRequest>,
) -> ApiResult<Created<Json<ReferralResponse>>> {
    let service = ReferralService::new(state.service_context());
    let referral = service.track(request).await?;
    Ok(Created(Json(referral)))
}

/// PUT /api/admin/referrals/:id/status
pub async fn update_referral_status(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateReferralStatusRequest>,
) -> ApiResult<Json<ReferralResponse>> {
    let service = ReferralService::new(state.service_context());
    Ok(Json(service.update_status(id, request).await?))
}
