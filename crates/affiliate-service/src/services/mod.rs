//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of one call.

pub mod admin;
pub mod affiliate;
pub mod application;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod program;
pub mod referral;
pub mod review;
pub mod settings;

pub use admin::AdminService;
pub use affiliate::AffiliateService;
pub use application::ApplicationService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use program::ProgramService;
pub use referral::ReferralService;
pub use review::ReviewService;
pub use settings::SettingsService;

use affiliate_mail::OutgoingMail;
use tracing::warn;

/// Send a notification without failing the caller
///
/// Returns true when the mailer reports delivery.
pub(crate) async fn deliver(ctx: &ServiceContext, mail: OutgoingMail) -> bool {
    let to = mail.to.clone();
    let subject = mail.subject.clone();
    match ctx.mailer().send(mail).await {
        Ok(()) => ctx.mailer().delivers(),
        Err(e) => {
            warn!(to = %to, subject = %subject, error = %e, "Failed to send notification");
            false
        }
    }
}
