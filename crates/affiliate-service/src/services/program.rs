//! Program service

use affiliate_core::entities::NewProgram;
use affiliate_core::error::DomainError;
use affiliate_core::value_objects::ProgramStatus;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{CreateProgramRequest, ProgramResponse, UpdateStatusRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ProgramService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgramService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Programs shown on the public marketing page
    pub async fn list_published(&self) -> ServiceResult<Vec<ProgramResponse>> {
        let programs = self.ctx.program_repo().list_published().await?;
        Ok(programs.into_iter().map(Into::into).collect())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<ProgramResponse>> {
        let programs = self.ctx.program_repo().list_all().await?;
        Ok(programs.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateProgramRequest) -> ServiceResult<ProgramResponse> {
        let status = match request.status.as_deref() {
            Some(status) => status.parse().map_err(DomainError::from)?,
            None => ProgramStatus::Draft,
        };

        let program = NewProgram {
            name: request.name.trim().to_string(),
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            commission_rate: DomainError::check_commission_rate(request.commission_rate)?,
            status,
            created_at: Utc::now(),
        };

        let created = self.ctx.program_repo().create(&program).await?;
        info!(program_id = created.id, status = %created.status, "Program created");
        Ok(created.into())
    }

    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        program_id: i64,
        request: UpdateStatusRequest,
    ) -> ServiceResult<ProgramResponse> {
        let status: ProgramStatus = request.status.parse().map_err(DomainError::from)?;
        let program = self
            .ctx
            .program_repo()
            .update_status(program_id, status, Utc::now())
            .await?;
        info!(program_id, status = %program.status, "Program status updated");
        Ok(program.into())
    }
}
