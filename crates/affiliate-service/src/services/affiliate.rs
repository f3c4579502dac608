//! Affiliate self-service
//!
//! Profile, payment settings and referral history of the signed-in affiliate.

use affiliate_core::entities::PaymentDetails;
use affiliate_core::error::DomainError;
use affiliate_core::traits::ReferralQuery;
use affiliate_core::value_objects::ReferralStatus;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::mappers::affiliate_response;
use crate::dto::{
    AffiliateResponse, PageRequest, PageResponse, PaymentInfoResponse, PaymentSettingsRequest,
    ReferralResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AffiliateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AffiliateService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, affiliate_id: i64) -> ServiceResult<AffiliateResponse> {
        let affiliate = self
            .ctx
            .affiliate_repo()
            .find_by_id(affiliate_id)
            .await?
            .ok_or(DomainError::AffiliateNotFound(affiliate_id))?;
        Ok(affiliate_response(&affiliate, &self.ctx.settings().frontend_url))
    }

    /// Current payout details, if any were saved
    #[instrument(skip(self))]
    pub async fn payment_info(&self, affiliate_id: i64) -> ServiceResult<Option<PaymentInfoResponse>> {
        let payment = self
            .ctx
            .payment_repo()
            .find_for_affiliate(affiliate_id)
            .await?;
        Ok(payment.map(Into::into))
    }

    /// Insert or replace payout details; one row per affiliate
    #[instrument(skip(self, request))]
    pub async fn update_payment_info(
        &self,
        affiliate_id: i64,
        request: PaymentSettingsRequest,
    ) -> ServiceResult<PaymentInfoResponse> {
        let details = PaymentDetails {
            bank_name: request.bank_name.trim().to_string(),
            account_number: request.account_number.trim().to_string(),
            account_name: request.account_name.trim().to_string(),
        };
        if details.bank_name.is_empty()
            || details.account_number.is_empty()
            || details.account_name.is_empty()
        {
            return Err(DomainError::ValidationError(
                "bankName, accountNumber and accountName are required".to_string(),
            )
            .into());
        }

        let payment = self
            .ctx
            .payment_repo()
            .upsert(affiliate_id, &details, Utc::now())
            .await?;
        info!(affiliate_id, payment_id = payment.id, "Payment settings saved");

        Ok(payment.into())
    }

    /// Own referrals, newest first
    #[instrument(skip(self))]
    pub async fn referrals(
        &self,
        affiliate_id: i64,
        status: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ReferralResponse>> {
        let status = status
            .map(str::parse::<ReferralStatus>)
            .transpose()
            .map_err(DomainError::from)?;

        let query = ReferralQuery {
            status,
            limit: page.limit,
            offset: page.offset(),
        };
        let (rows, total) = tokio::try_join!(
            self.ctx.referral_repo().list_for_affiliate(affiliate_id, query),
            self.ctx.referral_repo().count_for_affiliate(affiliate_id, status),
        )?;

        Ok(PageResponse::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}
