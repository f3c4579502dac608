//! Admin back-office handlers
//!
//! Every route here requires an admin token.

use affiliate_service::dto::{
    AdminResponse, AffiliateResponse, ApplicationResponse, OverviewResponse, PageResponse,
    ReviewApplicationRequest, ReviewResponse, UpdateStatusRequest,
};
use affiliate_service::{AdminService, ReviewService};
use axum::{extract::State, Json};
use tracing::info;

use crate::extractors::{AdminAuth, IdPath, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/admin/me
pub async fn me(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
) -> Json<AdminResponse> {
    Json(AdminService::new(state.service_context()).me(&admin))
}

/// GET /api/admin/overview
pub async fn overview(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> ApiResult<Json<OverviewResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.overview().await?))
}

/// GET /api/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    pagination: Pagination,
) -> ApiResult<Json<PageResponse<ApplicationResponse>>> {
    let service = AdminService::new(state.service_context());
    let page = service
        .list_applications(pagination.status(), pagination.page)
        .await?;
    Ok(Json(page))
}

/// GET /api/admin/applications/:id
pub async fn get_application(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApplicationResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.get_application(id).await?))
}

/// Approve or reject a pending application
///
/// POST /api/admin/applications/:id/review
pub async fn review_application(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ReviewApplicationRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    info!(admin_id = admin.id, application_id = id, decision = %request.status, "Reviewing application");
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.review(admin.id, id, request).await?))
}

/// GET /api/admin/affiliates
pub async fn list_affiliates(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    pagination: Pagination,
) -> ApiResult<Json<PageResponse<AffiliateResponse>>> {
    let service = AdminService::new(state.service_context());
    let page = service
        .list_affiliates(pagination.status(), pagination.page)
        .await?;
    Ok(Json(page))
}

/// GET /api/admin/affiliates/:id
pub async fn get_affiliate(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<AffiliateResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.get_affiliate(id).await?))
}

/// PUT /api/admin/affiliates/:id/status
pub async fn update_affiliate_status(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<AffiliateResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.update_affiliate_status(&admin, id, request).await?))
}
