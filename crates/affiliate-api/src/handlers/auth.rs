//! Login handlers

use affiliate_service::dto::{AdminLoginResponse, AffiliateLoginResponse, LoginRequest};
use affiliate_service::AuthService;
use axum::{extract::State, Json};

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Affiliate login
///
/// POST /api/affiliates/login
pub async fn affiliate_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AffiliateLoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.affiliate_login(request).await?;
    Ok(Json(response))
}

/// Admin login
///
/// POST /api/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AdminLoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.admin_login(request).await?;
    Ok(Json(response))
}
