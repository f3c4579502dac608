//! SQL implementation of ProgramRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use affiliate_core::entities::{AffiliateProgram, NewProgram};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{ProgramRepository, RepoResult};
use affiliate_core::value_objects::ProgramStatus;

use crate::models::ProgramModel;
use crate::pool::{with_pool, Database};

use super::error::map_db_error;

/// SQL implementation of ProgramRepository
#[derive(Clone)]
pub struct SqlProgramRepository {
    db: Database,
}

impl SqlProgramRepository {
    /// Create a new SqlProgramRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn list_where_status(&self, status: Option<ProgramStatus>) -> RepoResult<Vec<AffiliateProgram>> {
        let status = status.map(ProgramStatus::as_str);
        let models = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ProgramModel>(
                r"
                SELECT id, name, description, commission_rate, status, created_at, updated_at
                FROM affiliate_programs
                WHERE ($1 IS NULL OR status = $1)
                ORDER BY created_at DESC, id DESC
                ",
            )
            .bind(status)
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        models.into_iter().map(AffiliateProgram::try_from).collect()
    }
}

#[async_trait]
impl ProgramRepository for SqlProgramRepository {
    #[instrument(skip(self))]
    async fn list_published(&self) -> RepoResult<Vec<AffiliateProgram>> {
        self.list_where_status(Some(ProgramStatus::Published)).await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<AffiliateProgram>> {
        self.list_where_status(None).await
    }

    #[instrument(skip(self, program), fields(name = %program.name))]
    async fn create(&self, program: &NewProgram) -> RepoResult<AffiliateProgram> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ProgramModel>(
                r"
                INSERT INTO affiliate_programs
                    (name, description, commission_rate, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING id, name, description, commission_rate, status, created_at, updated_at
                ",
            )
            .bind(&program.name)
            .bind(&program.description)
            .bind(program.commission_rate)
            .bind(program.status.as_str())
            .bind(program.created_at)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)?;

        AffiliateProgram::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: i64,
        status: ProgramStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliateProgram> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ProgramModel>(
                r"
                UPDATE affiliate_programs
                SET status = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, name, description, commission_rate, status, created_at, updated_at
                ",
            )
            .bind(id)
            .bind(status.as_str())
            .bind(at)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result
            .ok_or(DomainError::ProgramNotFound(id))
            .and_then(AffiliateProgram::try_from)
    }
}
