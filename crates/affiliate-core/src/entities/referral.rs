//! Referral entity - a platform user who signed up through an affiliate

use chrono::{DateTime, Utc};

use crate::value_objects::ReferralStatus;

/// Referral with its commission lifecycle
#[derive(Debug, Clone, PartialEq)]
pub struct AffiliateReferral {
    pub id: i64,
    pub affiliate_id: i64,
    pub referred_user_id: i64,
    pub status: ReferralStatus,
    pub sale_amount: f64,
    pub commission_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Referral joined with the referred user's display fields
///
/// The user fields are absent when the platform user row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferralWithUser {
    pub referral: AffiliateReferral,
    pub referred_user_name: Option<String>,
    pub referred_user_email: Option<String>,
}

/// Referral row to insert when a signup is tracked
#[derive(Debug, Clone, PartialEq)]
pub struct NewReferral {
    pub affiliate_id: i64,
    pub referred_user_id: i64,
    pub sale_amount: f64,
    pub commission_amount: f64,
    pub created_at: DateTime<Utc>,
}
