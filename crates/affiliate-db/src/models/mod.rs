//! Database models
//!
//! Row structs shared by the PostgreSQL and SQLite backends. Status and role
//! columns are read as text and parsed by the mappers.

mod admin;
mod affiliate;
mod application;
mod payment;
mod program;
mod referral;
mod setting;

pub use admin::AdminModel;
pub use affiliate::{AffiliateModel, CredentialModel};
pub use application::ApplicationModel;
pub use payment::PaymentModel;
pub use program::ProgramModel;
pub use referral::{ReferralModel, ReferralWithUserModel, StatusAggregateRow};
pub use setting::SettingModel;
