//! Liveness and readiness checks

use tracing::warn;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Round-trip the database
    pub async fn check_database(&self) -> ServiceResult<()> {
        self.ctx.database().ping().await.map_err(|e| {
            warn!(error = %e, "Database readiness check failed");
            ServiceError::internal(format!("database unavailable: {e}"))
        })
    }

    /// Name of the active database backend
    pub fn backend(&self) -> &'static str {
        match self.ctx.database().backend() {
            affiliate_common::config::DatabaseBackend::Postgres => "postgres",
            affiliate_common::config::DatabaseBackend::Sqlite => "sqlite",
        }
    }
}
