//! # affiliate-core
//!
//! Domain layer containing entities, status value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, mail transport).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminUser, Affiliate, AffiliateApplication, AffiliateCredential, AffiliatePayment,
    AffiliateProgram, AffiliateReferral, NewAdminUser, NewAffiliate, NewApplication, NewProgram,
    NewReferral, PaymentDetails, ReferralWithUser, SystemSetting, normalize_email,
};
pub use error::DomainError;
pub use traits::{
    AdminRepository, AffiliateQuery, AffiliateRepository, ApplicationQuery,
    ApplicationRepository, ApplicationStatusCounts, Approval, Page, PaymentRepository,
    ProgramRepository, ReferralQuery, ReferralRepository, ReferralStats, RepoResult,
    SettingsRepository,
};
pub use value_objects::{
    calculate_commission, generate_affiliate_code, is_valid_affiliate_code, AdminRole,
    AffiliateStatus, ApplicationStatus, ProgramStatus, ReferralStatus, StatusParseError,
    AFFILIATE_CODE_LEN,
};
