//! Affiliate self-service handlers
//!
//! All routes here require an active affiliate token.

use affiliate_service::dto::{
    AffiliateResponse, DashboardResponse, PageResponse, PaymentInfoResponse,
    PaymentSettingsRequest, ReferralResponse, ReferralStatsResponse,
};
use affiliate_service::{AffiliateService, DashboardService};
use axum::{extract::State, Json};

use crate::extractors::{AffiliateAuth, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/affiliates/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
) -> ApiResult<Json<DashboardResponse>> {
    let service = DashboardService::new(state.service_context());
    Ok(Json(service.dashboard(affiliate.id).await?))
}

/// GET /api/affiliates/profile
pub async fn profile(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
) -> ApiResult<Json<AffiliateResponse>> {
    let service = AffiliateService::new(state.service_context());
    Ok(Json(service.profile(affiliate.id).await?))
}

/// GET /api/affiliates/stats
pub async fn stats(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
) -> ApiResult<Json<ReferralStatsResponse>> {
    let service = DashboardService::new(state.service_context());
    Ok(Json(service.stats(affiliate.id).await?))
}

/// GET /api/affiliates/referrals
pub async fn referrals(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
    pagination: Pagination,
) -> ApiResult<Json<PageResponse<ReferralResponse>>> {
    let service = AffiliateService::new(state.service_context());
    let page = service
        .referrals(affiliate.id, pagination.status(), pagination.page)
        .await?;
    Ok(Json(page))
}

/// Current payout details, `null` until first saved
///
/// GET /api/affiliates/payment-settings
pub async fn payment_settings(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
) -> ApiResult<Json<Option<PaymentInfoResponse>>> {
    let service = AffiliateService::new(state.service_context());
    Ok(Json(service.payment_info(affiliate.id).await?))
}

/// PUT /api/affiliates/payment-settings
pub async fn update_payment_settings(
    State(state): State<AppState>,
    AffiliateAuth(affiliate): AffiliateAuth,
    ValidatedJson(request): ValidatedJson<PaymentSettingsRequest>,
) -> ApiResult<Json<PaymentInfoResponse>> {
    let service = AffiliateService::new(state.service_context());
    Ok(Json(service.update_payment_info(affiliate.id, request).await?))
}
