//! Referral service
//!
//! Public referral tracking by affiliate code and the admin-driven commission
//! lifecycle (`pending -> confirmed -> paid`).

use affiliate_core::entities::NewReferral;
use affiliate_core::error::DomainError;
use affiliate_core::value_objects::{calculate_commission, ReferralStatus};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{ReferralResponse, TrackReferralRequest, UpdateReferralStatusRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ReferralService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReferralService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a signup made through an active affiliate's code
    #[instrument(skip(self, request), fields(code = %request.affiliate_code))]
    pub async fn track(&self, request: TrackReferralRequest) -> ServiceResult<ReferralResponse> {
        let code = request.affiliate_code.trim().to_ascii_uppercase();
        let affiliate = self
            .ctx
            .affiliate_repo()
            .find_by_code(&code)
            .await?
            .filter(affiliate_core::Affiliate::is_active)
            .ok_or_else(|| DomainError::AffiliateCodeNotFound(code.clone()))?;

        let sale_amount = request.sale_amount.unwrap_or(0.0);
        let referral = NewReferral {
            affiliate_id: affiliate.id,
            referred_user_id: request.referred_user_id,
            sale_amount,
            commission_amount: calculate_commission(sale_amount, affiliate.commission_rate),
            created_at: Utc::now(),
        };

        let created = self.ctx.referral_repo().create(&referral).await?;
        info!(
            referral_id = created.id,
            affiliate_id = affiliate.id,
            referred_user_id = created.referred_user_id,
            "Referral tracked"
        );
        Ok(created.into())
    }

    /// Move a referral forward; a new sale amount recomputes the commission
    /// at the affiliate's current rate
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        referral_id: i64,
        request: UpdateReferralStatusRequest,
    ) -> ServiceResult<ReferralResponse> {
        let next: ReferralStatus = request.status.parse().map_err(DomainError::from)?;

        let current = self
            .ctx
            .referral_repo()
            .find_by_id(referral_id)
            .await?
            .ok_or(DomainError::ReferralNotFound(referral_id))?;

        if !current.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        let (sale_amount, commission_amount) = match request.sale_amount {
            Some(sale_amount) => {
                let affiliate = self
                    .ctx
                    .affiliate_repo()
                    .find_by_id(current.affiliate_id)
                    .await?
                    .ok_or(DomainError::AffiliateNotFound(current.affiliate_id))?;
                (
                    sale_amount,
                    calculate_commission(sale_amount, affiliate.commission_rate),
                )
            }
            None => (current.sale_amount, current.commission_amount),
        };

        let updated = self
            .ctx
            .referral_repo()
            .update_status(
                referral_id,
                current.status,
                next,
                sale_amount,
                commission_amount,
                Utc::now(),
            )
            .await?;

        info!(referral_id, from = %current.status, to = %next, "Referral status updated");
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ReviewApplicationRequest;
    use crate::services::{testing, ApplicationService, DashboardService, ReviewService};
    use affiliate_core::value_objects::{AdminRole, AffiliateStatus};
    use serde_json::json;

    async fn affiliate(ctx: &ServiceContext) -> (i64, String) {
        let admin = testing::admin(ctx, AdminRole::Admin).await;
        let request =
            serde_json::from_value(json!({"fullName": "Katherine Johnson", "email": "kj@example.com"}))
                .unwrap();
        let id = ApplicationService::new(ctx).submit(request).await.unwrap().id;
        let affiliate = ReviewService::new(ctx)
            .review(
                admin.id,
                id,
                ReviewApplicationRequest {
                    status: "approved".to_string(),
                    commission_rate: Some(10.0),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .affiliate
            .unwrap();
        (affiliate.id, affiliate.affiliate_code)
    }

    fn track(code: &str, user: i64, sale: Option<f64>) -> TrackReferralRequest {
        TrackReferralRequest {
            affiliate_code: code.to_string(),
            referred_user_id: user,
            sale_amount: sale,
        }
    }

    fn status(status: &str, sale: Option<f64>) -> UpdateReferralStatusRequest {
        UpdateReferralStatusRequest {
            status: status.to_string(),
            sale_amount: sale,
        }
    }

    #[tokio::test]
    async fn test_track_computes_commission() {
        let (ctx, _) = testing::context().await;
        let (affiliate_id, code) = affiliate(&ctx).await;
        let service = ReferralService::new(&ctx);

        let referral = service
            .track(track(&code.to_lowercase(), 7, Some(250.0)))
            .await
            .unwrap();
        assert_eq!(referral.affiliate_id, affiliate_id);
        assert_eq!(referral.status, ReferralStatus::Pending);
        assert!((referral.commission_amount - 25.0).abs() < 1e-9);

        let err = service.track(track("ZZZZZZZZ", 7, None)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_inactive_code_is_unknown() {
        let (ctx, _) = testing::context().await;
        let (affiliate_id, code) = affiliate(&ctx).await;
        ctx.affiliate_repo()
            .update_status(affiliate_id, AffiliateStatus::Inactive, Utc::now())
            .await
            .unwrap();

        let err = ReferralService::new(&ctx)
            .track(track(&code, 1, None))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_AFFILIATE_CODE");
    }

    #[tokio::test]
    async fn test_status_moves_forward_only() {
        let (ctx, _) = testing::context().await;
        let (_, code) = affiliate(&ctx).await;
        let service = ReferralService::new(&ctx);
        let referral = service.track(track(&code, 1, None)).await.unwrap();

        let confirmed = service
            .update_status(referral.id, status("completed", Some(400.0)))
            .await
            .unwrap();
        assert_eq!(confirmed.status, ReferralStatus::Confirmed);
        assert!((confirmed.commission_amount - 40.0).abs() < 1e-9);

        let err = service
            .update_status(referral.id, status("pending", None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "INVALID_STATUS_TRANSITION");

        let paid = service.update_status(referral.id, status("paid", None)).await.unwrap();
        assert_eq!(paid.status, ReferralStatus::Paid);
        assert!((paid.sale_amount - 400.0).abs() < 1e-9);

        let err = service
            .update_status(referral.id, status("paid", None))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let err = service.update_status(9999, status("paid", None)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_dashboard_stats_match_referrals() {
        let (ctx, _) = testing::context().await;
        let (affiliate_id, code) = affiliate(&ctx).await;
        let service = ReferralService::new(&ctx);

        let mut ids = Vec::new();
        for user in 1..=5 {
            ids.push(service.track(track(&code, user, Some(100.0))).await.unwrap().id);
        }
        service.update_status(ids[0], status("confirmed", None)).await.unwrap();
        service.update_status(ids[1], status("paid", None)).await.unwrap();

        let dashboard = DashboardService::new(&ctx).dashboard(affiliate_id).await.unwrap();
        assert_eq!(dashboard.stats.total_referrals, 5);
        assert_eq!(dashboard.stats.pending_referrals, 3);
        assert_eq!(dashboard.stats.confirmed_referrals, 1);
        assert_eq!(dashboard.stats.paid_referrals, 1);
        assert!((dashboard.stats.total_commission - 50.0).abs() < 1e-9);
        assert_eq!(dashboard.recent_referrals.len(), 5);
        assert!(dashboard.payment_info.is_none());
        assert_eq!(dashboard.affiliate.id, affiliate_id);
    }
}
