//! Domain entities - core business objects

mod admin;
mod affiliate;
mod application;
mod payment;
mod program;
mod referral;
mod setting;

pub use admin::{AdminUser, NewAdminUser};
pub use affiliate::{Affiliate, AffiliateCredential, NewAffiliate};
pub use application::{normalize_email, AffiliateApplication, NewApplication};
pub use payment::{AffiliatePayment, PaymentDetails};
pub use program::{AffiliateProgram, NewProgram};
pub use referral::{AffiliateReferral, NewReferral, ReferralWithUser};
pub use setting::SystemSetting;
