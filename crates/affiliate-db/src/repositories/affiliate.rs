//! SQL implementation of AffiliateRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use affiliate_core::entities::{Affiliate, AffiliateCredential};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{AffiliateQuery, AffiliateRepository, RepoResult};
use affiliate_core::value_objects::AffiliateStatus;

use crate::mappers::parse_column;
use crate::models::{AffiliateModel, CredentialModel};
use crate::pool::{with_pool, Database};

use super::error::map_db_error;

/// SQL implementation of AffiliateRepository
#[derive(Clone)]
pub struct SqlAffiliateRepository {
    db: Database,
}

impl SqlAffiliateRepository {
    /// Create a new SqlAffiliateRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AffiliateRepository for SqlAffiliateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Affiliate>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AffiliateModel>(
                r"
                SELECT id, application_id, full_name, email, phone, affiliate_code,
                       commission_rate, status, created_at, updated_at
                FROM affiliates
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(Affiliate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Affiliate>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AffiliateModel>(
                r"
                SELECT id, application_id, full_name, email, phone, affiliate_code,
                       commission_rate, status, created_at, updated_at
                FROM affiliates
                WHERE affiliate_code = $1
                ",
            )
            .bind(code)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(Affiliate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn code_exists(&self, code: &str) -> RepoResult<bool> {
        let count = with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM affiliates WHERE affiliate_code = $1")
                .bind(code)
                .fetch_one(pool)
                .await
        })
        .map_err(map_db_error)?;

        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> RepoResult<Option<AffiliateCredential>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, CredentialModel>(
                r"
                SELECT affiliate_id, email, password_hash, last_login_at, created_at
                FROM affiliate_credentials
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(result.map(AffiliateCredential::from))
    }

    #[instrument(skip(self))]
    async fn touch_last_login(&self, affiliate_id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        with_pool!(&self.db, pool => {
            sqlx::query("UPDATE affiliate_credentials SET last_login_at = $2 WHERE affiliate_id = $1")
                .bind(affiliate_id)
                .bind(at)
                .execute(pool)
                .await
                .map(|_| ())
        })
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: AffiliateQuery) -> RepoResult<Vec<Affiliate>> {
        let status = query.status.map(AffiliateStatus::as_str);
        let models = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AffiliateModel>(
                r"
                SELECT id, application_id, full_name, email, phone, affiliate_code,
                       commission_rate, status, created_at, updated_at
                FROM affiliates
                WHERE ($1 IS NULL OR status = $1)
                ORDER BY created_at DESC, id DESC
                LIMIT $2 OFFSET $3
                ",
            )
            .bind(status)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        models.into_iter().map(Affiliate::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<AffiliateStatus>) -> RepoResult<i64> {
        let status = status.map(AffiliateStatus::as_str);
        with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM affiliates WHERE ($1 IS NULL OR status = $1)",
            )
            .bind(status)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<Vec<(AffiliateStatus, i64)>> {
        let rows = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, (String, i64)>(
                "SELECT status, COUNT(*) FROM affiliates GROUP BY status ORDER BY status",
            )
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(status, count)| Ok((parse_column("affiliates.status", &status)?, count)))
            .collect()
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: i64,
        status: AffiliateStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<Affiliate> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AffiliateModel>(
                r"
                UPDATE affiliates
                SET status = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, application_id, full_name, email, phone, affiliate_code,
                          commission_rate, status, created_at, updated_at
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
            .ok_or(DomainError::AffiliateNotFound(id))
            .and_then(Affiliate::try_from)
    }
}
