//! Referral model -> entity mappers

use affiliate_core::entities::{AffiliateReferral, ReferralWithUser};
use affiliate_core::error::DomainError;
use affiliate_core::traits::ReferralStats;
use affiliate_core::value_objects::ReferralStatus;

use super::parse_column;
use crate::models::{ReferralModel, ReferralWithUserModel, StatusAggregateRow};

impl TryFrom<ReferralModel> for AffiliateReferral {
    type Error = DomainError;

    fn try_from(model: ReferralModel) -> Result<Self, Self::Error> {
        Ok(AffiliateReferral {
            id: model.id,
            affiliate_id: model.affiliate_id,
            referred_user_id: model.referred_user_id,
            status: parse_column("affiliate_referrals.status", &model.status)?,
            sale_amount: model.sale_amount,
            commission_amount: model.commission_amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReferralWithUserModel> for ReferralWithUser {
    type Error = DomainError;

    fn try_from(model: ReferralWithUserModel) -> Result<Self, Self::Error> {
        Ok(ReferralWithUser {
            referral: AffiliateReferral::try_from(model.referral)?,
            referred_user_name: model.referred_user_name,
            referred_user_email: model.referred_user_email,
        })
    }
}

/// Fold `GROUP BY status` rows into per-status stats
pub fn referral_stats_from_rows(rows: Vec<StatusAggregateRow>) -> Result<ReferralStats, DomainError> {
    let mut stats = ReferralStats::default();
    for row in rows {
        let status: ReferralStatus = parse_column("affiliate_referrals.status", &row.status)?;
        stats.add(status, row.count, row.commission);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, count: i64, commission: f64) -> StatusAggregateRow {
        StatusAggregateRow {
            status: status.to_string(),
            count,
            commission,
        }
    }

    #[test]
    fn test_referral_stats_from_rows() {
        let stats = referral_stats_from_rows(vec![
            row("pending", 3, 15.0),
            row("paid", 2, 40.0),
        ])
        .unwrap();

        assert_eq!(stats.pending, 3);
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.paid, 2);
        assert_eq!(stats.total_referrals(), 5);
        assert!((stats.total_commission() - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_status_row_is_an_error() {
        assert!(referral_stats_from_rows(vec![row("refunded", 1, 0.0)]).is_err());
    }
}
