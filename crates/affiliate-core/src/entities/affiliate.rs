//! Affiliate entity - an approved applicant with a referral code

use chrono::{DateTime, Utc};

use crate::entities::AffiliateApplication;
use crate::value_objects::AffiliateStatus;

/// Affiliate account created when an application is approved
#[derive(Debug, Clone, PartialEq)]
pub struct Affiliate {
    pub id: i64,
    pub application_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub affiliate_code: String,
    /// Commission percentage (0-100)
    pub commission_rate: f64,
    pub status: AffiliateStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Affiliate {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Referral link for this affiliate on the given site
    pub fn referral_link(&self, base_url: &str) -> String {
        format!("{}/?ref={}", base_url.trim_end_matches('/'), self.affiliate_code)
    }
}

/// Affiliate row to insert at approval time
#[derive(Debug, Clone, PartialEq)]
pub struct NewAffiliate {
    pub application_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub affiliate_code: String,
    pub commission_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl NewAffiliate {
    /// Copy the applicant fields of an application into a new affiliate
    pub fn from_application(
        application: &AffiliateApplication,
        affiliate_code: String,
        commission_rate: f64,
    ) -> Self {
        Self {
            application_id: application.id,
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            affiliate_code,
            commission_rate,
            created_at: Utc::now(),
        }
    }
}

/// Login credentials owned 1:1 by an affiliate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateCredential {
    pub affiliate_id: i64,
    pub email: String,
    pub password_hash: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
