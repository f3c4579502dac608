//! Public application handlers

use affiliate_service::dto::{
    ApplicationStatusResponse, ApplicationSubmittedResponse, SubmitApplicationRequest,
};
use affiliate_service::ApplicationService;
use axum::{
    extract::{Path, State},
    Json,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Submit an affiliate application
///
/// POST /api/affiliates/applications
pub async fn submit_application(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitApplicationRequest>,
) -> ApiResult<Created<Json<ApplicationSubmittedResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.submit(request).await?;
    Ok(Created(Json(response)))
}

/// Look up an application by applicant email
///
/// GET /api/affiliates/applications/status/:email
pub async fn application_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<ApplicationStatusResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.status_by_email(&email).await?;
    Ok(Json(response))
}
