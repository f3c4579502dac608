//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Affiliate responses need the frontend URL for the referral link and use
//! [`affiliate_response`] instead.

use affiliate_core::entities::{
    AdminUser, Affiliate, AffiliateApplication, AffiliatePayment, AffiliateProgram,
    AffiliateReferral, ReferralWithUser, SystemSetting,
};
use affiliate_core::traits::{ApplicationStatusCounts, ReferralStats};
use affiliate_core::value_objects::AffiliateStatus;

use super::responses::{
    AdminResponse, AffiliateCountsResponse, AffiliateResponse, ApplicationCountsResponse,
    ApplicationResponse, ApplicationStatusResponse, PaymentInfoResponse, ProgramResponse,
    ReferralResponse, ReferralStatsResponse, SettingResponse,
};

// ============================================================================
// Application Mappers
// ============================================================================

impl From<AffiliateApplication> for ApplicationResponse {
    fn from(app: AffiliateApplication) -> Self {
        Self {
            id: app.id,
            full_name: app.full_name,
            email: app.email,
            phone: app.phone,
            social_media_handles: app.social_media_handles,
            audience_size: app.audience_size,
            audience_description: app.audience_description,
            motivation: app.motivation,
            status: app.status,
            review_notes: app.review_notes,
            reviewed_by: app.reviewed_by,
            reviewed_at: app.reviewed_at,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}

impl From<AffiliateApplication> for ApplicationStatusResponse {
    fn from(app: AffiliateApplication) -> Self {
        Self {
            id: app.id,
            full_name: app.full_name,
            email: app.email,
            status: app.status,
            created_at: app.created_at,
            reviewed_at: app.reviewed_at,
        }
    }
}

impl From<ApplicationStatusCounts> for ApplicationCountsResponse {
    fn from(counts: ApplicationStatusCounts) -> Self {
        Self {
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

// ============================================================================
// Affiliate Mappers
// ============================================================================

/// Affiliate with its referral link on `frontend_url`
pub fn affiliate_response(affiliate: &Affiliate, frontend_url: &str) -> AffiliateResponse {
    AffiliateResponse {
        id: affiliate.id,
        application_id: affiliate.application_id,
        full_name: affiliate.full_name.clone(),
        email: affiliate.email.clone(),
        phone: affiliate.phone.clone(),
        affiliate_code: affiliate.affiliate_code.clone(),
        commission_rate: affiliate.commission_rate,
        status: affiliate.status,
        referral_link: affiliate.referral_link(frontend_url),
        created_at: affiliate.created_at,
        updated_at: affiliate.updated_at,
    }
}

impl From<Vec<(AffiliateStatus, i64)>> for AffiliateCountsResponse {
    fn from(rows: Vec<(AffiliateStatus, i64)>) -> Self {
        let mut counts = Self::default();
        for (status, count) in rows {
            match status {
                AffiliateStatus::Active => counts.active += count,
                AffiliateStatus::Suspended => counts.suspended += count,
                AffiliateStatus::Inactive => counts.inactive += count,
            }
            counts.total += count;
        }
        counts
    }
}

impl From<&AdminUser> for AdminResponse {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            full_name: admin.full_name.clone(),
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

// ============================================================================
// Referral Mappers
// ============================================================================

impl From<AffiliateReferral> for ReferralResponse {
    fn from(referral: AffiliateReferral) -> Self {
        Self {
            id: referral.id,
            affiliate_id: referral.affiliate_id,
            referred_user_id: referral.referred_user_id,
            referred_user_name: None,
            referred_user_email: None,
            status: referral.status,
            sale_amount: referral.sale_amount,
            commission_amount: referral.commission_amount,
            created_at: referral.created_at,
            updated_at: referral.updated_at,
        }
    }
}

impl From<ReferralWithUser> for ReferralResponse {
    fn from(row: ReferralWithUser) -> Self {
        Self {
            referred_user_name: row.referred_user_name,
            referred_user_email: row.referred_user_email,
            ..Self::from(row.referral)
        }
    }
}

impl From<ReferralStats> for ReferralStatsResponse {
    fn from(stats: ReferralStats) -> Self {
        Self {
            total_referrals: stats.total_referrals(),
            pending_referrals: stats.pending,
            confirmed_referrals: stats.confirmed,
            paid_referrals: stats.paid,
            total_commission: stats.total_commission(),
            pending_commission: stats.pending_commission,
            confirmed_commission: stats.confirmed_commission,
            paid_commission: stats.paid_commission,
        }
    }
}

// ============================================================================
// Payment, Program & Setting Mappers
// ============================================================================

impl From<AffiliatePayment> for PaymentInfoResponse {
    fn from(payment: AffiliatePayment) -> Self {
        Self {
            masked_account_number: payment.masked_account_number(),
            id: payment.id,
            bank_name: payment.bank_name,
            account_number: payment.account_number,
            account_name: payment.account_name,
            updated_at: payment.updated_at,
        }
    }
}

impl From<AffiliateProgram> for ProgramResponse {
    fn from(program: AffiliateProgram) -> Self {
        Self {
            id: program.id,
            name: program.name,
            description: program.description,
            commission_rate: program.commission_rate,
            status: program.status,
            created_at: program.created_at,
            updated_at: program.updated_at,
        }
    }
}

impl From<SystemSetting> for SettingResponse {
    fn from(setting: SystemSetting) -> Self {
        Self {
            key: setting.key,
            value: setting.value,
            updated_at: setting.updated_at,
        }
    }
}
