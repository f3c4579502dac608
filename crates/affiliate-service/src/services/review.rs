//! Review service
//!
//! Drives the application review state machine. Approval issues the affiliate
//! code and login credentials in one repository transaction; notification
//! mail is sent afterwards and never undoes a committed decision.

use affiliate_common::auth::generate_password;
use affiliate_core::entities::{Affiliate, AffiliateApplication, SystemSetting};
use affiliate_core::error::DomainError;
use affiliate_core::traits::Approval;
use affiliate_core::value_objects::{generate_affiliate_code, ApplicationStatus};
use affiliate_mail::{templates, ApprovalNotice};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::dto::mappers::affiliate_response;
use crate::dto::{ReviewApplicationRequest, ReviewResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Fresh codes tried before giving up on an approval
const MAX_CODE_ATTEMPTS: usize = 5;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

fn trimmed(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply an admin decision to a pending application
    #[instrument(skip(self, request), fields(decision = %request.status))]
    pub async fn review(
        &self,
        reviewer_id: i64,
        application_id: i64,
        request: ReviewApplicationRequest,
    ) -> ServiceResult<ReviewResponse> {
        let decision: ApplicationStatus = request.status.parse().map_err(DomainError::from)?;

        match decision {
            ApplicationStatus::Approved => {
                self.approve(reviewer_id, application_id, request.commission_rate, request.notes)
                    .await
            }
            ApplicationStatus::Rejected => {
                self.reject(reviewer_id, application_id, request.notes).await
            }
            ApplicationStatus::Pending => Err(DomainError::ValidationError(
                "status must be 'approved' or 'rejected'".to_string(),
            )
            .into()),
        }
    }

    /// Approve an application and issue credentials
    #[instrument(skip(self, notes))]
    pub async fn approve(
        &self,
        reviewer_id: i64,
        application_id: i64,
        commission_rate: Option<f64>,
        notes: Option<String>,
    ) -> ServiceResult<ReviewResponse> {
        // Cheap pre-check; the guarded update in the repository is authoritative
        let current = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound(application_id))?;
        if current.status.is_terminal() {
            return Err(DomainError::ApplicationAlreadyReviewed(current.status).into());
        }

        let commission_rate = self.resolve_commission_rate(commission_rate).await?;
        let password = generate_password();
        let password_hash = self.ctx.password_service().hash(&password)?;

        let (application, affiliate) = self
            .approve_with_fresh_code(
                application_id,
                reviewer_id,
                trimmed(notes),
                commission_rate,
                &password_hash,
                Utc::now(),
            )
            .await?;

        info!(
            application_id,
            affiliate_id = affiliate.id,
            affiliate_code = %affiliate.affiliate_code,
            reviewer_id,
            "Application approved"
        );

        let settings = self.ctx.settings();
        let notice = ApprovalNotice {
            full_name: &affiliate.full_name,
            affiliate_code: &affiliate.affiliate_code,
            password: &password,
            commission_rate: affiliate.commission_rate,
            login_url: templates::login_url(&settings.frontend_url),
        };
        let mail = templates::application_approved(&affiliate.email, &notice, &settings.app_name);
        let email_sent = super::deliver(self.ctx, mail).await;
        if !email_sent {
            warn!(
                affiliate_id = affiliate.id,
                "Approval mail not delivered; returning issued password to the reviewer"
            );
        }

        Ok(ReviewResponse {
            application: application.into(),
            affiliate: Some(affiliate_response(&affiliate, &settings.frontend_url)),
            email_sent,
            issued_password: (!email_sent).then_some(password),
        })
    }

    /// Reject an application; no affiliate is created
    #[instrument(skip(self, notes))]
    pub async fn reject(
        &self,
        reviewer_id: i64,
        application_id: i64,
        notes: Option<String>,
    ) -> ServiceResult<ReviewResponse> {
        let notes = trimmed(notes);
        let application = self
            .ctx
            .application_repo()
            .reject(application_id, reviewer_id, notes.as_deref(), Utc::now())
            .await?;

        info!(application_id, reviewer_id, "Application rejected");

        let mail = templates::application_rejected(
            &application.email,
            &application.full_name,
            notes.as_deref(),
            &self.ctx.settings().app_name,
        );
        let email_sent = super::deliver(self.ctx, mail).await;

        Ok(ReviewResponse {
            application: application.into(),
            affiliate: None,
            email_sent,
            issued_password: None,
        })
    }

    /// Commission for a new affiliate: the reviewer's value, else the
    /// `default_commission_rate` setting, else configuration
    pub async fn resolve_commission_rate(&self, requested: Option<f64>) -> ServiceResult<f64> {
        if let Some(rate) = requested {
            return Ok(DomainError::check_commission_rate(rate)?);
        }

        if let Some(setting) = self
            .ctx
            .settings_repo()
            .get(SystemSetting::DEFAULT_COMMISSION_RATE)
            .await?
        {
            match setting.value.trim().parse::<f64>() {
                Ok(rate) if DomainError::check_commission_rate(rate).is_ok() => return Ok(rate),
                _ => warn!(value = %setting.value, "Ignoring invalid default_commission_rate setting"),
            }
        }

        Ok(DomainError::check_commission_rate(
            self.ctx.settings().default_commission_rate,
        )?)
    }

    async fn approve_with_fresh_code(
        &self,
        application_id: i64,
        reviewer_id: i64,
        notes: Option<String>,
        commission_rate: f64,
        password_hash: &str,
        reviewed_at: DateTime<Utc>,
    ) -> ServiceResult<(AffiliateApplication, Affiliate)> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_affiliate_code();
            if self.ctx.affiliate_repo().code_exists(&code).await? {
                debug!(attempt, "Generated affiliate code already taken");
                continue;
            }

            let approval = Approval {
                application_id,
                reviewer_id,
                notes: notes.clone(),
                affiliate_code: code,
                commission_rate,
                password_hash: password_hash.to_string(),
                reviewed_at,
            };

            match self.ctx.application_repo().approve(&approval).await {
                Ok(result) => return Ok(result),
                Err(DomainError::AffiliateCodeExists) => {
                    warn!(attempt, "Affiliate code collided during approval, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "could not allocate a unique affiliate code",
        ))
    }
}
