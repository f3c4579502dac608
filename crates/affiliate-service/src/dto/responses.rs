//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase field names.

use chrono::{DateTime, Utc};
use serde::Serialize;

use affiliate_core::value_objects::{
    AdminRole, AffiliateStatus, ApplicationStatus, ProgramStatus, ReferralStatus,
};

use super::requests::PageRequest;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of results with offset pagination metadata
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };
        Self {
            data,
            pagination: PaginationMeta {
                page: request.page,
                limit: request.limit,
                total,
                total_pages,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Application Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmittedResponse {
    pub id: i64,
    pub status: ApplicationStatus,
    pub message: String,
}

/// Public status lookup; carries no review notes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Full application as seen by admins
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub social_media_handles: Option<String>,
    pub audience_size: Option<String>,
    pub audience_description: Option<String>,
    pub motivation: Option<String>,
    pub status: ApplicationStatus,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of an approve or reject decision
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub application: ApplicationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate: Option<AffiliateResponse>,
    /// Whether the notification mail left the server
    pub email_sent: bool,
    /// Issued password, returned only when the approval mail was not delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_password: Option<String>,
}

// ============================================================================
// Affiliate Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateResponse {
    pub id: i64,
    pub application_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub affiliate_code: String,
    pub commission_rate: f64,
    pub status: AffiliateStatus,
    pub referral_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub affiliate: AffiliateResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub admin: AdminResponse,
}

// ============================================================================
// Referral Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub id: i64,
    pub affiliate_id: i64,
    pub referred_user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_user_email: Option<String>,
    pub status: ReferralStatus,
    pub sale_amount: f64,
    pub commission_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Referral counts and commission sums by status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStatsResponse {
    pub total_referrals: i64,
    pub pending_referrals: i64,
    pub confirmed_referrals: i64,
    pub paid_referrals: i64,
    pub total_commission: f64,
    pub pending_commission: f64,
    pub confirmed_commission: f64,
    pub paid_commission: f64,
}

// ============================================================================
// Dashboard & Payment Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoResponse {
    pub id: i64,
    pub bank_name: String,
    pub account_number: String,
    pub masked_account_number: String,
    pub account_name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub affiliate: AffiliateResponse,
    pub stats: ReferralStatsResponse,
    pub recent_referrals: Vec<ReferralResponse>,
    pub payment_info: Option<PaymentInfoResponse>,
}

// ============================================================================
// Program & Settings Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub commission_rate: f64,
    pub status: ProgramStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingResponse {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Admin Overview
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCountsResponse {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateCountsResponse {
    pub active: i64,
    pub suspended: i64,
    pub inactive: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub applications: ApplicationCountsResponse,
    pub affiliates: AffiliateCountsResponse,
    pub referrals: ReferralStatsResponse,
}
