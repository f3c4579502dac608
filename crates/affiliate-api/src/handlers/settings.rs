//! System settings handlers

use affiliate_service::dto::{SettingResponse, UpdateSettingRequest};
use affiliate_service::SettingsService;
use axum::{
    extract::{Path, State},
    Json,
};

use crate::extractors::{AdminAuth, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn list_settings(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /api/admin/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    Path(key): Path<String>,
) -> ApiResult<Json<SettingResponse>> {
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.get(&key).await?))
}

/// Super admins only
///
/// PUT /api/admin/settings/:key
pub async fn update_setting(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(key): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateSettingRequest>,
) -> ApiResult<Json<SettingResponse>> {
    let service = SettingsService::new(state.service_context());
    Ok(Json(service.update(&admin, &key, request).await?))
}
