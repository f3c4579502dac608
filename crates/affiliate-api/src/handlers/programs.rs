//! Affiliate program handlers

use affiliate_service::dto::{CreateProgramRequest, ProgramResponse, UpdateStatusRequest};
use affiliate_service::ProgramService;
use axum::{extract::State, Json};

use crate::extractors::{AdminAuth, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Published programs for the marketing page
///
/// GET /api/affiliates/programs
pub async fn published_programs(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProgramResponse>>> {
    let service = ProgramService::new(state.service_context());
    Ok(Json(service.list_published().await?))
}

/// GET /api/admin/programs
pub async fn list_programs(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
) -> ApiResult<Json<Vec<ProgramResponse>>> {
    let service = ProgramService::new(state.service_context());
    Ok(Json(service.list_all().await?))
}

/// POST /api/admin/programs
pub async fn create_program(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    ValidatedJson(request): ValidatedJson<CreateProgramRequest>,
) -> ApiResult<Created<Json<ProgramResponse>>> {
    let service = ProgramService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// PUT /api/admin/programs/:id/status
pub async fn update_program_status(
    State(state): State<AppState>,
    AdminAuth(_admin): AdminAuth,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<ProgramResponse>> {
    let service = ProgramService::new(state.service_context());
    Ok(Json(service.update_status(id, request).await?))
}
