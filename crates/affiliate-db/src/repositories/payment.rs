//! SQL implementation of PaymentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use affiliate_core::entities::{AffiliatePayment, PaymentDetails};
use affiliate_core::traits::{PaymentRepository, RepoResult};

use crate::models::PaymentModel;
use crate::pool::{with_pool, Database};

use super::error::map_db_error;

/// SQL implementation of PaymentRepository
#[derive(Clone)]
pub struct SqlPaymentRepository {
    db: Database,
}

impl SqlPaymentRepository {
    /// Create a new SqlPaymentRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SqlPaymentRepository {
    #[instrument(skip(self))]
    async fn find_for_affiliate(&self, affiliate_id: i64) -> RepoResult<Option<AffiliatePayment>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, PaymentModel>(
                r"
                SELECT id, affiliate_id, bank_name, account_number, account_name,
                       created_at, updated_at
                FROM affiliate_payments
                WHERE affiliate_id = $1
                ",
            )
            .bind(affiliate_id)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(result.map(AffiliatePayment::from))
    }

    #[instrument(skip(self, details))]
    async fn upsert(
        &self,
        affiliate_id: i64,
        details: &PaymentDetails,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliatePayment> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, PaymentModel>(
                r"
                INSERT INTO affiliate_payments
                    (affiliate_id, bank_name, account_number, account_name, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
                ON CONFLICT (affiliate_id) DO UPDATE
                SET bank_name = excluded.bank_name,
                    account_number = excluded.account_number,
                    account_name = excluded.account_name,
                    updated_at = excluded.updated_at
                RETURNING id, affiliate_id, bank_name, account_number, account_name,
                          created_at, updated_at
                ",
            )
            .bind(affiliate_id)
            .bind(&details.bank_name)
            .bind(&details.account_number)
            .bind(&details.account_name)
            .bind(at)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(AffiliatePayment::from(model))
    }
}
