//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::path::Path;
use std::sync::Arc;

use affiliate_common::{AppConfig, AppError, JwtService};
use affiliate_db::Database;
use affiliate_mail::{mailer_from_config, Mailer};
use affiliate_service::{AdminService, ServiceContextBuilder, ServiceSettings};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes bypass the rate limiter. With `STATIC_DIR` set, non-API
/// paths serve the frontend bundle and fall back to its `index.html`.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let mut router = apply_middleware(
        health_routes().merge(api),
        &config.cors,
        config.app.env.is_production(),
    );

    if let Some(dir) = config.static_dir.as_deref() {
        router = router.fallback_service(frontend_service(dir));
    }

    Ok(router.with_state(state))
}

fn frontend_service(dir: &str) -> ServeDir<ServeFile> {
    let root = Path::new(dir);
    if !root.is_dir() {
        warn!(dir = %dir, "STATIC_DIR does not exist; frontend requests will 404");
    } else {
        info!(dir = %dir, "Serving frontend bundle");
    }
    ServeDir::new(root).fallback(ServeFile::new(root.join("index.html")))
}

/// Connect the database, build the mailer and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(backend = ?config.database.backend, "Connecting to database...");
    let database = Database::connect(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    database
        .init_schema()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let mailer = mailer_from_config(&config.email).map_err(|e| AppError::Mail(e.to_string()))?;

    create_app_state_with_mailer(config, database, mailer).await
}

/// Create AppState on an existing database and mailer
///
/// Seeds the default super admin before returning.
pub async fn create_app_state_with_mailer(
    config: AppConfig,
    database: Database,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState, AppError> {
    if config.jwt.insecure_secret {
        warn!("JWT_SECRET is not set; using the development fallback secret");
    }
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expires_in));

    let service_context = ServiceContextBuilder::new()
        .database(database)
        .jwt_service(jwt_service)
        .mailer(mailer)
        .settings(ServiceSettings::from_config(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    AdminService::new(&service_context)
        .seed_default_admin(&config.admin)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("admin seeding failed: {e}")))?;

    Ok(AppState::new(service_context, config))
}

/// Serve an application on a bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
