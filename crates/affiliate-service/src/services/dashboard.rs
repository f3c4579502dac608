//! Dashboard service
//!
//! Read-only composition of the affiliate row, referral stats, recent
//! referrals and payment info. The four queries run concurrently and are not
//! read in one transaction.

use affiliate_core::error::DomainError;
use affiliate_core::traits::ReferralQuery;
use tracing::instrument;

use crate::dto::mappers::affiliate_response;
use crate::dto::{DashboardResponse, ReferralStatsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Referrals shown on the dashboard
pub const RECENT_REFERRALS: i64 = 10;

pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, affiliate_id: i64) -> ServiceResult<DashboardResponse> {
        let recent_query = ReferralQuery {
            status: None,
            limit: RECENT_REFERRALS,
            offset: 0,
        };

        let (affiliate, stats, recent, payment) = tokio::try_join!(
            self.ctx.affiliate_repo().find_by_id(affiliate_id),
            self.ctx.referral_repo().stats_for_affiliate(affiliate_id),
            self.ctx
                .referral_repo()
                .list_for_affiliate(affiliate_id, recent_query),
            self.ctx.payment_repo().find_for_affiliate(affiliate_id),
        )?;

        let affiliate = affiliate.ok_or(DomainError::AffiliateNotFound(affiliate_id))?;

        Ok(DashboardResponse {
            affiliate: affiliate_response(&affiliate, &self.ctx.settings().frontend_url),
            stats: stats.into(),
            recent_referrals: recent.into_iter().map(Into::into).collect(),
            payment_info: payment.map(Into::into),
        })
    }

    /// Referral counts and commission sums by status
    #[instrument(skip(self))]
    pub async fn stats(&self, affiliate_id: i64) -> ServiceResult<ReferralStatsResponse> {
        let stats = self
            .ctx
            .referral_repo()
            .stats_for_affiliate(affiliate_id)
            .await?;
        Ok(stats.into())
    }
}
