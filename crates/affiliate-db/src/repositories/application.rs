//! SQL implementation of ApplicationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use affiliate_core::entities::{Affiliate, AffiliateApplication, NewAffiliate, NewApplication};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{
    ApplicationQuery, ApplicationRepository, ApplicationStatusCounts, Approval, RepoResult,
};
use affiliate_core::value_objects::ApplicationStatus;

use crate::mappers::parse_column;
use crate::models::{AffiliateModel, ApplicationModel};
use crate::pool::{with_pool, Database};

use super::error::{is_unique_violation_on, map_db_error, map_unique_violation};

/// SQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct SqlApplicationRepository {
    db: Database,
}

impl SqlApplicationRepository {
    /// Create a new SqlApplicationRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Error for a review that matched no pending row
fn review_conflict(id: i64, current_status: Option<String>) -> DomainError {
    match current_status {
        None => DomainError::ApplicationNotFound(id),
        Some(status) => match parse_column::<ApplicationStatus>("affiliate_applications.status", &status) {
            Ok(status) => DomainError::ApplicationAlreadyReviewed(status),
            Err(e) => e,
        },
    }
}

#[async_trait]
impl ApplicationRepository for SqlApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AffiliateApplication>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ApplicationModel>(
                r"
                SELECT id, full_name, email, phone, social_media_handles, audience_size,
                       audience_description, motivation, status, review_notes, reviewed_by,
                       reviewed_at, created_at, updated_at
                FROM affiliate_applications
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(AffiliateApplication::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AffiliateApplication>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ApplicationModel>(
                r"
                SELECT id, full_name, email, phone, social_media_handles, audience_size,
                       audience_description, motivation, status, review_notes, reviewed_by,
                       reviewed_at, created_at, updated_at
                FROM affiliate_applications
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(AffiliateApplication::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let count = with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM affiliate_applications WHERE email = $1",
            )
            .bind(email)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(count > 0)
    }

    #[instrument(skip(self, application), fields(email = %application.email))]
    async fn create(&self, application: &NewApplication) -> RepoResult<AffiliateApplication> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ApplicationModel>(
                r"
                INSERT INTO affiliate_applications
                    (full_name, email, phone, social_media_handles, audience_size,
                     audience_description, motivation, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $8)
                RETURNING id, full_name, email, phone, social_media_handles, audience_size,
                          audience_description, motivation, status, review_notes, reviewed_by,
                          reviewed_at, created_at, updated_at
                ",
            )
            .bind(&application.full_name)
            .bind(&application.email)
            .bind(&application.phone)
            .bind(&application.social_media_handles)
            .bind(&application.audience_size)
            .bind(&application.audience_description)
            .bind(&application.motivation)
            .bind(application.created_at)
            .fetch_one(pool)
            .await
        })
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateApplication))?;

        AffiliateApplication::try_from(model)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ApplicationQuery) -> RepoResult<Vec<AffiliateApplication>> {
        let status = query.status.map(ApplicationStatus::as_str);
        let models = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ApplicationModel>(
                r"
                SELECT id, full_name, email, phone, social_media_handles, audience_size,
                       audience_description, motivation, status, review_notes, reviewed_by,
                       reviewed_at, created_at, updated_at
                FROM affiliate_applications
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

        models.into_iter().map(AffiliateApplication::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<ApplicationStatus>) -> RepoResult<i64> {
        let status = status.map(ApplicationStatus::as_str);
        with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM affiliate_applications WHERE ($1 IS NULL OR status = $1)",
            )
            .bind(status)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<ApplicationStatusCounts> {
        let rows = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, (String, i64)>(
                "SELECT status, COUNT(*) FROM affiliate_applications GROUP BY status",
            )
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        let mut counts = ApplicationStatusCounts::default();
        for (status, count) in rows {
            counts.add(parse_column("affiliate_applications.status", &status)?, count);
        }
        Ok(counts)
    }

    #[instrument(skip(self, approval), fields(application_id = approval.application_id, code = %approval.affiliate_code))]
    async fn approve(&self, approval: &Approval) -> RepoResult<(AffiliateApplication, Affiliate)> {
        with_pool!(&self.db, pool => {
            let mut tx = pool.begin().await.map_err(map_db_error)?;

            // Guarded transition: only a pending row can be approved
            let updated = sqlx::query_as::<_, ApplicationModel>(
                r"
                UPDATE affiliate_applications
                SET status = 'approved', review_notes = $2, reviewed_by = $3,
                    reviewed_at = $4, updated_at = $4
                WHERE id = $1 AND status = 'pending'
                RETURNING id, full_name, email, phone, social_media_handles, audience_size,
                          audience_description, motivation, status, review_notes, reviewed_by,
                          reviewed_at, created_at, updated_at
                ",
            )
            .bind(approval.application_id)
            .bind(&approval.notes)
            .bind(approval.reviewer_id)
            .bind(approval.reviewed_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            let Some(model) = updated else {
                let current = sqlx::query_scalar::<_, String>(
                    "SELECT status FROM affiliate_applications WHERE id = $1",
                )
                .bind(approval.application_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
                return Err(review_conflict(approval.application_id, current));
            };
            let application = AffiliateApplication::try_from(model)?;

            let mut new_affiliate = NewAffiliate::from_application(
                &application,
                approval.affiliate_code.clone(),
                approval.commission_rate,
            );
            new_affiliate.created_at = approval.reviewed_at;

            let affiliate = sqlx::query_as::<_, AffiliateModel>(
                r"
                INSERT INTO affiliates
                    (application_id, full_name, email, phone, affiliate_code, commission_rate,
                     status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $7)
                RETURNING id, application_id, full_name, email, phone, affiliate_code,
                          commission_rate, status, created_at, updated_at
                ",
            )
            .bind(new_affiliate.application_id)
            .bind(&new_affiliate.full_name)
            .bind(&new_affiliate.email)
            .bind(&new_affiliate.phone)
            .bind(&new_affiliate.affiliate_code)
            .bind(new_affiliate.commission_rate)
            .bind(new_affiliate.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation_on(&e, "affiliate_code") {
                    DomainError::AffiliateCodeExists
                } else {
                    map_unique_violation(e, || DomainError::AffiliateAlreadyExists)
                }
            })?;
            let affiliate = Affiliate::try_from(affiliate)?;

            sqlx::query(
                r"
                INSERT INTO affiliate_credentials (affiliate_id, email, password_hash, created_at)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(affiliate.id)
            .bind(&affiliate.email)
            .bind(&approval.password_hash)
            .bind(approval.reviewed_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::AffiliateAlreadyExists))?;

            tx.commit().await.map_err(map_db_error)?;
            debug!(affiliate_id = affiliate.id, "Approval committed");

            Ok((application, affiliate))
        })
    }

    #[instrument(skip(self, notes))]
    async fn reject(
        &self,
        id: i64,
        reviewer_id: i64,
        notes: Option<&str>,
        reviewed_at: DateTime<Utc>,
    ) -> RepoResult<AffiliateApplication> {
        with_pool!(&self.db, pool => {
            let mut tx = pool.begin().await.map_err(map_db_error)?;

            let updated = sqlx::query_as::<_, ApplicationModel>(
                r"
                UPDATE affiliate_applications
                SET status = 'rejected', review_notes = $2, reviewed_by = $3,
                    reviewed_at = $4, updated_at = $4
                WHERE id = $1 AND status = 'pending'
                RETURNING id, full_name, email, phone, social_media_handles, audience_size,
                          audience_description, motivation, status, review_notes, reviewed_by,
                          reviewed_at, created_at, updated_at
                ",
            )
            .bind(id)
            .bind(notes)
            .bind(reviewer_id)
            .bind(reviewed_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            let Some(model) = updated else {
                let current = sqlx::query_scalar::<_, String>(
                    "SELECT status FROM affiliate_applications WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
                return Err(review_conflict(id, current));
            };

            tx.commit().await.map_err(map_db_error)?;
            AffiliateApplication::try_from(model)
        })
    }
}
