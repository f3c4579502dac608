//! Route definitions
//!
//! All API routes are mounted under /api. Unknown /api paths answer with a
//! JSON 404 so they never fall through to the frontend bundle.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    admin, affiliates, applications, auth, health, programs, referrals, settings,
};
use crate::response::ApiError;
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(affiliate_routes())
        .merge(admin_routes())
        .fallback(api_not_found)
}

async fn api_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Unauthenticated routes
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/affiliates/applications", post(applications::submit_application))
        .route(
            "/affiliates/applications/status/:email",
            get(applications::application_status),
        )
        .route("/affiliates/login", post(auth::affiliate_login))
        .route("/affiliates/programs", get(programs::published_programs))
        .route("/affiliates/referrals/track", post(referrals::track_referral))
        .route("/admin/login", post(auth::admin_login))
}

/// Routes for an active affiliate
fn affiliate_routes() -> Router<AppState> {
    Router::new()
        .route("/affiliates/dashboard", get(affiliates::dashboard))
        .route("/affiliates/profile", get(affiliates::profile))
        .route("/affiliates/stats", get(affiliates::stats))
        .route("/affiliates/referrals", get(affiliates::referrals))
        .route(
            "/affiliates/payment-settings",
            get(affiliates::payment_settings).put(affiliates::update_payment_settings),
        )
        .route(
            "/affiliates/payment-info",
            get(affiliates::payment_settings).put(affiliates::update_payment_settings),
        )
}

/// Back-office routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/me", get(admin::me))
        .route("/admin/overview", get(admin::overview))
        // Applications
        .route("/admin/applications", get(admin::list_applications))
        .route("/admin/applications/:id", get(admin::get_application))
        .route("/admin/applications/:id/review", post(admin::review_application))
        // Affiliates
        .route("/admin/affiliates", get(admin::list_affiliates))
        .route("/admin/affiliates/:id", get(admin::get_affiliate))
        .route("/admin/affiliates/:id/status", put(admin::update_affiliate_status))
        // Referrals
        .route("/admin/referrals/:id/status", put(referrals::update_referral_status))
        // Programs
        .route(
            "/admin/programs",
            get(programs::list_programs).post(programs::create_program),
        )
        .route("/admin/programs/:id/status", put(programs::update_program_status))
        // Settings
        .route("/admin/settings", get(settings::list_settings))
        .route(
            "/admin/settings/:key",
            get(settings::get_setting).put(settings::update_setting),
        )
}
