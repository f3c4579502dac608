//! Repository implementations
//!
//! One implementation per repository trait from affiliate-core. Each method
//! runs the same SQL on PostgreSQL or SQLite depending on the [`Database`]
//! handle it was built with.
//!
//! [`Database`]: crate::pool::Database

mod admin;
mod affiliate;
mod application;
mod error;
mod payment;
mod program;
mod referral;
mod settings;

pub use admin::SqlAdminRepository;
pub use affiliate::SqlAffiliateRepository;
pub use application::SqlApplicationRepository;
pub use error::{is_unique_violation_on, map_db_error, map_unique_violation};
pub use payment::SqlPaymentRepository;
pub use program::SqlProgramRepository;
pub use referral::SqlReferralRepository;
pub use settings::SqlSettingsRepository;
