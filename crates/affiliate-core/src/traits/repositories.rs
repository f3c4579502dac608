//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the persistence layer
//! provides PostgreSQL and SQLite implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AdminUser, Affiliate, AffiliateApplication, AffiliateCredential, AffiliatePayment,
    AffiliateProgram, AffiliateReferral, NewAdminUser, NewApplication, NewProgram, NewReferral,
    PaymentDetails, ReferralWithUser, SystemSetting,
};
use crate::error::DomainError;
use crate::value_objects::{
    AffiliateStatus, ApplicationStatus, ProgramStatus, ReferralStatus,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One page of a listing plus the total number of matching rows
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// Application Repository
// ============================================================================

/// Filter and pagination options for application listings
#[derive(Debug, Clone, Default)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Everything the approval transaction writes besides the applicant fields
#[derive(Debug, Clone)]
pub struct Approval {
    pub application_id: i64,
    pub reviewer_id: i64,
    pub notes: Option<String>,
    pub affiliate_code: String,
    pub commission_rate: f64,
    pub password_hash: String,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationStatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl ApplicationStatusCounts {
    pub fn add(&mut self, status: ApplicationStatus, count: i64) {
        match status {
            ApplicationStatus::Pending => self.pending += count,
            ApplicationStatus::Approved => self.approved += count,
            ApplicationStatus::Rejected => self.rejected += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected
    }
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AffiliateApplication>>;

    /// Find application by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AffiliateApplication>>;

    /// Check if an application was already submitted with this email
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert a pending application
    ///
    /// Fails with `DuplicateApplication` when the email is already on file.
    async fn create(&self, application: &NewApplication) -> RepoResult<AffiliateApplication>;

    /// List applications, newest first
    async fn list(&self, query: ApplicationQuery) -> RepoResult<Vec<AffiliateApplication>>;

    /// Count applications matching the listing filter
    async fn count(&self, status: Option<ApplicationStatus>) -> RepoResult<i64>;

    /// Count applications per status
    async fn count_by_status(&self) -> RepoResult<ApplicationStatusCounts>;

    /// Approve a pending application in one transaction
    ///
    /// Marks the application approved, creates the affiliate from the
    /// applicant fields and stores its credential. Fails with
    /// `ApplicationAlreadyReviewed` (writing nothing) unless the application
    /// is still pending.
    async fn approve(&self, approval: &Approval) -> RepoResult<(AffiliateApplication, Affiliate)>;

    /// Reject a pending application
    async fn reject(
        &self,
        id: i64,
        reviewer_id: i64,
        notes: Option<&str>,
        reviewed_at: DateTime<Utc>,
    ) -> RepoResult<AffiliateApplication>;
}

// ============================================================================
// Affiliate Repository
// ============================================================================

/// Filter and pagination options for affiliate listings
#[derive(Debug, Clone, Default)]
pub struct AffiliateQuery {
    pub status: Option<AffiliateStatus>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait AffiliateRepository: Send + Sync {
    /// Find affiliate by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Affiliate>>;

    /// Find affiliate by referral code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Affiliate>>;

    /// Check if a referral code is taken
    async fn code_exists(&self, code: &str) -> RepoResult<bool>;

    /// Find login credentials by (normalized) email
    async fn find_credential_by_email(&self, email: &str)
        -> RepoResult<Option<AffiliateCredential>>;

    /// Record a successful login
    async fn touch_last_login(&self, affiliate_id: i64, at: DateTime<Utc>) -> RepoResult<()>;

    /// List affiliates, newest first
    async fn list(&self, query: AffiliateQuery) -> RepoResult<Vec<Affiliate>>;

    /// Count affiliates matching the listing filter
    async fn count(&self, status: Option<AffiliateStatus>) -> RepoResult<i64>;

    /// Count affiliates per status
    async fn count_by_status(&self) -> RepoResult<Vec<(AffiliateStatus, i64)>>;

    /// Change an affiliate's account status
    async fn update_status(
        &self,
        id: i64,
        status: AffiliateStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<Affiliate>;
}

// ============================================================================
// Referral Repository
// ============================================================================

/// Filter and pagination options for referral listings
#[derive(Debug, Clone, Default)]
pub struct ReferralQuery {
    pub status: Option<ReferralStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Referral counts and commission sums grouped by status
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferralStats {
    pub pending: i64,
    pub confirmed: i64,
    pub paid: i64,
    pub pending_commission: f64,
    pub confirmed_commission: f64,
    pub paid_commission: f64,
}

impl ReferralStats {
    pub fn add(&mut self, status: ReferralStatus, count: i64, commission: f64) {
        match status {
            ReferralStatus::Pending => {
                self.pending += count;
                self.pending_commission += commission;
            }
            ReferralStatus::Confirmed => {
                self.confirmed += count;
                self.confirmed_commission += commission;
            }
            ReferralStatus::Paid => {
                self.paid += count;
                self.paid_commission += commission;
            }
        }
    }

    pub fn total_referrals(&self) -> i64 {
        self.pending + self.confirmed + self.paid
    }

    pub fn total_commission(&self) -> f64 {
        self.pending_commission + self.confirmed_commission + self.paid_commission
    }
}

#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// Find referral by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AffiliateReferral>>;

    /// Insert a pending referral
    async fn create(&self, referral: &NewReferral) -> RepoResult<AffiliateReferral>;

    /// List an affiliate's referrals with referred-user fields, newest first
    async fn list_for_affiliate(
        &self,
        affiliate_id: i64,
        query: ReferralQuery,
    ) -> RepoResult<Vec<ReferralWithUser>>;

    /// Count an affiliate's referrals matching the listing filter
    async fn count_for_affiliate(
        &self,
        affiliate_id: i64,
        status: Option<ReferralStatus>,
    ) -> RepoResult<i64>;

    /// Per-status counts and commission sums for one affiliate
    async fn stats_for_affiliate(&self, affiliate_id: i64) -> RepoResult<ReferralStats>;

    /// Per-status counts and commission sums across all affiliates
    async fn stats_overall(&self) -> RepoResult<ReferralStats>;

    /// Move a referral from `from` to `to`, storing the amounts
    ///
    /// The update only applies while the stored status is still `from`.
    /// Otherwise fails with `InvalidStatusTransition` (or `ReferralNotFound`).
    async fn update_status(
        &self,
        id: i64,
        from: ReferralStatus,
        to: ReferralStatus,
        sale_amount: f64,
        commission_amount: f64,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliateReferral>;
}

// ============================================================================
// Payment Repository
// ============================================================================

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Current payment record of an affiliate
    async fn find_for_affiliate(&self, affiliate_id: i64) -> RepoResult<Option<AffiliatePayment>>;

    /// Insert or replace the payment record of an affiliate
    async fn upsert(
        &self,
        affiliate_id: i64,
        details: &PaymentDetails,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliatePayment>;
}

// ============================================================================
// Program Repository
// ============================================================================

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Published programs, newest first
    async fn list_published(&self) -> RepoResult<Vec<AffiliateProgram>>;

    /// All programs, newest first
    async fn list_all(&self) -> RepoResult<Vec<AffiliateProgram>>;

    /// Create a program
    async fn create(&self, program: &NewProgram) -> RepoResult<AffiliateProgram>;

    /// Change a program's status
    async fn update_status(
        &self,
        id: i64,
        status: ProgramStatus,
        at: DateTime<Utc>,
    ) -> RepoResult<AffiliateProgram>;
}

// ============================================================================
// Settings Repository
// ============================================================================

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get a setting by key
    async fn get(&self, key: &str) -> RepoResult<Option<SystemSetting>>;

    /// Insert or overwrite a setting
    async fn set(&self, key: &str, value: &str, at: DateTime<Utc>) -> RepoResult<SystemSetting>;

    /// All settings ordered by key
    async fn list(&self) -> RepoResult<Vec<SystemSetting>>;
}

// ============================================================================
// Admin Repository
// ============================================================================

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find admin by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AdminUser>>;

    /// Find admin by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AdminUser>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Create an admin account
    async fn create(&self, admin: &NewAdminUser, password_hash: &str) -> RepoResult<AdminUser>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_stats_totals() {
        let mut stats = ReferralStats::default();
        stats.add(ReferralStatus::Pending, 2, 10.0);
        stats.add(ReferralStatus::Paid, 1, 5.5);

        assert_eq!(stats.total_referrals(), 3);
        assert!((stats.total_commission() - 15.5).abs() < f64::EPSILON);
        assert_eq!(stats.confirmed, 0);
    }

    #[test]
    fn test_application_counts_total() {
        let mut counts = ApplicationStatusCounts::default();
        counts.add(ApplicationStatus::Pending, 4);
        counts.add(ApplicationStatus::Rejected, 1);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_page_map() {
        let page = Page { items: vec![1, 2, 3], total: 10 };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 10);
    }
}
