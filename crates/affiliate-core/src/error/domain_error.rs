//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ApplicationStatus, StatusParseError};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Application not found: {0}")]
    ApplicationNotFound(i64),

    #[error("No application found for email: {0}")]
    ApplicationNotFoundForEmail(String),

    #[error("Affiliate not found: {0}")]
    AffiliateNotFound(i64),

    #[error("Affiliate code not found: {0}")]
    AffiliateCodeNotFound(String),

    #[error("Admin not found: {0}")]
    AdminNotFound(i64),

    #[error("Referral not found: {0}")]
    ReferralNotFound(i64),

    #[error("Program not found: {0}")]
    ProgramNotFound(i64),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    InvalidStatus(#[from] StatusParseError),

    #[error("Commission rate must be between 0 and 100, got {0}")]
    InvalidCommissionRate(f64),

    #[error("An application with this email already exists")]
    DuplicateApplication,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Affiliate account is not active")]
    AffiliateNotActive,

    #[error("Insufficient role: {0} required")]
    InsufficientRole(&'static str),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Application has already been {0}")]
    ApplicationAlreadyReviewed(ApplicationStatus),

    #[error("An affiliate already exists for this application or email")]
    AffiliateAlreadyExists,

    #[error("Affiliate code already exists")]
    AffiliateCodeExists,

    #[error("Admin email already in use")]
    AdminEmailExists,

    #[error("Cannot change status from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ApplicationNotFound(_) | Self::ApplicationNotFoundForEmail(_) => {
                "APPLICATION_NOT_FOUND"
            }
            Self::AffiliateNotFound(_) => "AFFILIATE_NOT_FOUND",
            Self::AffiliateCodeNotFound(_) => "UNKNOWN_AFFILIATE_CODE",
            Self::AdminNotFound(_) => "ADMIN_NOT_FOUND",
            Self::ReferralNotFound(_) => "REFERRAL_NOT_FOUND",
            Self::ProgramNotFound(_) => "PROGRAM_NOT_FOUND",
            Self::SettingNotFound(_) => "SETTING_NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidCommissionRate(_) => "INVALID_COMMISSION_RATE",
            Self::DuplicateApplication => "DUPLICATE_APPLICATION",

            // Authorization
            Self::AffiliateNotActive => "AFFILIATE_NOT_ACTIVE",
            Self::InsufficientRole(_) => "INSUFFICIENT_ROLE",

            // Conflict
            Self::ApplicationAlreadyReviewed(_) => "APPLICATION_ALREADY_REVIEWED",
            Self::AffiliateAlreadyExists => "AFFILIATE_ALREADY_EXISTS",
            Self::AffiliateCodeExists => "AFFILIATE_CODE_EXISTS",
            Self::AdminEmailExists => "ADMIN_EMAIL_EXISTS",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ApplicationNotFound(_)
                | Self::ApplicationNotFoundForEmail(_)
                | Self::AffiliateNotFound(_)
                | Self::AffiliateCodeNotFound(_)
                | Self::AdminNotFound(_)
                | Self::ReferralNotFound(_)
                | Self::ProgramNotFound(_)
                | Self::SettingNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// A duplicate application is reported as a bad request, not a conflict.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidStatus(_)
                | Self::InvalidCommissionRate(_)
                | Self::DuplicateApplication
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AffiliateNotActive | Self::InsufficientRole(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ApplicationAlreadyReviewed(_)
                | Self::AffiliateAlreadyExists
                | Self::AffiliateCodeExists
                | Self::AdminEmailExists
                | Self::InvalidStatusTransition { .. }
        )
    }

    /// Validate a commission percentage
    pub fn check_commission_rate(rate: f64) -> Result<f64, Self> {
        if rate.is_finite() && (0.0..=100.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(Self::InvalidCommissionRate(rate))
        }
    }
}
