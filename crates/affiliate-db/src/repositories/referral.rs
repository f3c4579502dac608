//! SQL implementation of ReferralRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use affiliate_core::entities::{AffiliateReferral, NewReferral, ReferralWithUser};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{ReferralQuery, ReferralRepository, ReferralStats, RepoResult};
use affiliate_core::value_objects::ReferralStatus;

use crate::mappers::{parse_column, referral_stats_from_rows};
use crate::models::{ReferralModel, ReferralWithUserModel, StatusAggregateRow};
use crate::pool::{with_pool, Database};

use super::error::map_db_error;

/// SQL implementation of ReferralRepository
#[derive(Clone)]
pub struct SqlReferralRepository {
    db: Database,
}

impl SqlReferralRepository {
    /// Create a new SqlReferralRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferralRepository for SqlReferralRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AffiliateReferral>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ReferralModel>(
                r"
                SELECT id, affiliate_id, referred_user_id, status, sale_amount,
                       commission_amount, created_at, updated_at
                FROM affiliate_referrals
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(AffiliateReferral::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn create(&self, referral: &NewReferral) -> RepoResult<AffiliateReferral> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ReferralModel>(
                r"
                INSERT INTO affiliate_referrals
                    (affiliate_id, referred_user_id, status, sale_amount, commission_amount,
                     created_at, updated_at)
                VALUES ($1, $2, 'pending', $3, $4, $5, $5)
                RETURNING id, affiliate_id, referred_user_id, status, sale_amount,
                          commission_amount, created_at, updated_at
                ",
            )
            .bind(referral.affiliate_id)
            .bind(referral.referred_user_id)
            .bind(referral.sale_amount)
            .bind(referral.commission_amount)
            .bind(referral.created_at)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)?;

        AffiliateReferral::try_from(model)
    }

    #[instrument(skip(self))]
    async fn list_for_affiliate(
        &self,
        affiliate_id: i64,
        query: ReferralQuery,
    ) -> RepoResult<Vec<ReferralWithUser>> {
        let status = query.status.map(ReferralStatus::as_str);
        let models = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ReferralWithUserModel>(
                r"
                SELECT r.id, r.affiliate_id, r.referred_user_id, r.status, r.sale_amount,
                       r.commission_amount, r.created_at, r.updated_at,
                       u.full_name AS referred_user_name, u.email AS referred_user_email
                FROM affiliate_referrals r
                LEFT JOIN users u ON u.id = r.referred_user_id
                WHERE r.affiliate_id = $1 AND ($2 IS NULL OR r.status = $2)
                ORDER BY r.created_at DESC, r.id DESC
                LIMIT $3 OFFSET $4
                ",
            )
            .bind(affiliate_id)
            .bind(status)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        models.into_iter().map(ReferralWithUser::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_for_affiliate(
        &self,
        affiliate_id: i64,
        status: Option<ReferralStatus>,
    ) -> RepoResult<i64> {
        let status = status.map(ReferralStatus::as_str);
        with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, i64>(
                r"
                SELECT COUNT(*) FROM affiliate_referrals
                WHERE affiliate_id = $1 AND ($2 IS NULL OR status = $2)
                ",
            )
            .bind(affiliate_id)
            .bind(status)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn stats_for_affiliate(&self, affiliate_id: i64) -> RepoResult<ReferralStats> {
        let rows = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, StatusAggregateRow>(
                r"
                SELECT status, COUNT(*) AS count,
                       CAST(COALESCE(SUM(commission_amount), 0) AS DOUBLE PRECISION) AS commission
                FROM affiliate_referrals
                WHERE affiliate_id = $1
                GROUP BY status
                ",
            )
            .bind(affiliate_id)
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        referral_stats_from_rows(rows)
    }

    #[instrument(skip(self))]
    async fn stats_overall(&self) -> RepoResult<ReferralStats> {
        let rows = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, StatusAggregateRow>(
                r"
                SELECT status, COUNT(*) AS count,
                       CAST(COALESCE(SUM(commission_amount), 0) AS DOUBLE PRECISION) AS commission
                FROM affiliate_referrals
                GROUP BY status
                ",
            )
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        referral_stats_from_rows(rows)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: i64,
        from: ReferralStatus,
        to: ReferralStatus,
        sale_amount: f64,
        commission_amount: f64,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliateReferral> {
        let updated = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, ReferralModel>(
                r"
                UPDATE affiliate_referrals
                SET status = $3, sale_amount = $4, commission_amount = $5, updated_at = $6
                WHERE id = $1 AND status = $2
                RETURNING id, affiliate_id, referred_user_id, status, sale_amount,
                          commission_amount, created_at, updated_at
                ",
            )
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(sale_amount)
            .bind(commission_amount)
            .bind(at)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        if let Some(model) = updated {
            return AffiliateReferral::try_from(model);
        }

        // Lost a race or the row is gone
        let current = with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, String>("SELECT status FROM affiliate_referrals WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .map_err(map_db_error)?;

        match current {
            None => Err(DomainError::ReferralNotFound(id)),
            Some(current) => {
                let current: ReferralStatus =
                    parse_column("affiliate_referrals.status", &current)?;
                Err(DomainError::InvalidStatusTransition {
                    from: current.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }
}
