//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Default page size for admin and affiliate listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number whose offset still fits in an i64
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Reject strings that are empty once trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

// ============================================================================
// Pagination
// ============================================================================

/// One-based page request, clamped to sane bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// Application Requests
// ============================================================================

/// Public affiliate application form
///
/// `socialMediaHandles` and `audienceSize` are free-form; objects and numbers
/// are stored as their JSON text.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    #[validate(
        length(min = 2, max = 100, message = "Full name must be 2-100 characters"),
        custom(function = "not_blank")
    )]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    pub social_media_handles: Option<serde_json::Value>,

    pub audience_size: Option<serde_json::Value>,

    #[validate(length(max = 2000, message = "Audience description must be at most 2000 characters"))]
    pub audience_description: Option<String>,

    #[validate(length(max = 2000, message = "Motivation must be at most 2000 characters"))]
    pub motivation: Option<String>,
}

/// Admin decision on an application
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    /// `approved` or `rejected`
    pub status: String,

    #[validate(range(min = 0.0, max = 100.0, message = "Commission rate must be between 0 and 100"))]
    pub commission_rate: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Affiliate or admin login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Affiliate Requests
// ============================================================================

/// Bank details for commission payouts
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettingsRequest {
    #[validate(
        length(max = 100, message = "Bank name must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    pub bank_name: String,

    #[validate(
        length(max = 34, message = "Account number must be at most 34 characters"),
        custom(function = "not_blank")
    )]
    pub account_number: String,

    #[validate(
        length(max = 100, message = "Account name must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    pub account_name: String,
}

// ============================================================================
// Referral Requests
// ============================================================================

/// Record a platform signup made through an affiliate code
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackReferralRequest {
    #[validate(length(min = 1, max = 32, message = "Affiliate code is required"))]
    pub affiliate_code: String,

    #[validate(range(min = 1, message = "Referred user id must be positive"))]
    pub referred_user_id: i64,

    #[validate(range(min = 0.0, message = "Sale amount cannot be negative"))]
    pub sale_amount: Option<f64>,
}

/// Move a referral forward in its commission lifecycle
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferralStatusRequest {
    pub status: String,

    #[validate(range(min = 0.0, message = "Sale amount cannot be negative"))]
    pub sale_amount: Option<f64>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Change an affiliate or program status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Create an affiliate program
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    #[validate(
        length(min = 1, max = 200, message = "Program name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, max = 100.0, message = "Commission rate must be between 0 and 100"))]
    pub commission_rate: f64,

    /// Defaults to `draft`
    pub status: Option<String>,
}

/// Overwrite one system setting
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettingRequest {
    #[validate(length(max = 1000, message = "Value must be at most 1000 characters"))]
    pub value: String,
}
