//! Admin service
//!
//! Back-office listings, affiliate status changes, the overview counters and
//! startup seeding of the default super admin.

use affiliate_common::auth::generate_password;
use affiliate_common::config::AdminSeedConfig;
use affiliate_core::entities::{normalize_email, AdminUser, NewAdminUser};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{AffiliateQuery, ApplicationQuery};
use affiliate_core::value_objects::{AdminRole, AffiliateStatus, ApplicationStatus};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::dto::mappers::affiliate_response;
use crate::dto::{
    AdminResponse, AffiliateResponse, ApplicationResponse, OverviewResponse, PageRequest,
    PageResponse, UpdateStatusRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn me(&self, admin: &AdminUser) -> AdminResponse {
        admin.into()
    }

    // === Applications ===

    #[instrument(skip(self))]
    pub async fn list_applications(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ApplicationResponse>> {
        let status = status
            .map(str::parse::<ApplicationStatus>)
            .transpose()
            .map_err(DomainError::from)?;

        let query = ApplicationQuery {
            status,
            limit: page.limit,
            offset: page.offset(),
        };
        let (rows, total) = tokio::try_join!(
            self.ctx.application_repo().list(query),
            self.ctx.application_repo().count(status),
        )?;

        Ok(PageResponse::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_application(&self, id: i64) -> ServiceResult<ApplicationResponse> {
        let application = self
            .ctx
            .application_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ApplicationNotFound(id))?;
        Ok(application.into())
    }

    // === Affiliates ===

    #[instrument(skip(self))]
    pub async fn list_affiliates(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<AffiliateResponse>> {
        let status = status
            .map(str::parse::<AffiliateStatus>)
            .transpose()
            .map_err(DomainError::from)?;

        let query = AffiliateQuery {
            status,
            limit: page.limit,
            offset: page.offset(),
        };
        let (rows, total) = tokio::try_join!(
            self.ctx.affiliate_repo().list(query),
            self.ctx.affiliate_repo().count(status),
        )?;

        let frontend_url = &self.ctx.settings().frontend_url;
        Ok(PageResponse::new(
            rows.iter()
                .map(|a| affiliate_response(a, frontend_url))
                .collect(),
            page,
            total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_affiliate(&self, id: i64) -> ServiceResult<AffiliateResponse> {
        let affiliate = self
            .ctx
            .affiliate_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AffiliateNotFound(id))?;
        Ok(affiliate_response(&affiliate, &self.ctx.settings().frontend_url))
    }

    /// Activate, suspend or deactivate an affiliate
    ///
    /// Non-active affiliates lose access on their next request.
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_affiliate_status(
        &self,
        admin: &AdminUser,
        id: i64,
        request: UpdateStatusRequest,
    ) -> ServiceResult<AffiliateResponse> {
        let status: AffiliateStatus = request.status.parse().map_err(DomainError::from)?;
        let affiliate = self
            .ctx
            .affiliate_repo()
            .update_status(id, status, Utc::now())
            .await?;

        info!(affiliate_id = id, status = %status, admin_id = admin.id, "Affiliate status changed");
        Ok(affiliate_response(&affiliate, &self.ctx.settings().frontend_url))
    }

    // === Overview ===

    #[instrument(skip(self))]
    pub async fn overview(&self) -> ServiceResult<OverviewResponse> {
        let (applications, affiliates, referrals) = tokio::try_join!(
            self.ctx.application_repo().count_by_status(),
            self.ctx.affiliate_repo().count_by_status(),
            self.ctx.referral_repo().stats_overall(),
        )?;

        Ok(OverviewResponse {
            applications: applications.into(),
            affiliates: affiliates.into(),
            referrals: referrals.into(),
        })
    }

    // === Seeding ===

    /// Create the configured super admin unless that email already exists
    ///
    /// Without a configured password a random one is generated and logged
    /// once at WARN level. Returns the admin when one was created.
    #[instrument(skip(self, config), fields(email = %config.email))]
    pub async fn seed_default_admin(
        &self,
        config: &AdminSeedConfig,
    ) -> ServiceResult<Option<AdminUser>> {
        let email = normalize_email(&config.email);
        if self.ctx.admin_repo().find_by_email(&email).await?.is_some() {
            debug!("Default admin already present");
            return Ok(None);
        }

        let (password, generated) = match &config.password {
            Some(password) => (password.clone(), false),
            None => (generate_password(), true),
        };
        let password_hash = self.ctx.password_service().hash(&password)?;

        let new_admin = NewAdminUser {
            email: email.clone(),
            full_name: config.full_name.clone(),
            role: AdminRole::SuperAdmin,
            created_at: Utc::now(),
        };
        let admin = match self.ctx.admin_repo().create(&new_admin, &password_hash).await {
            Ok(admin) => admin,
            // Another instance seeded it first
            Err(DomainError::AdminEmailExists) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if generated {
            warn!(
                admin_id = admin.id,
                email = %email,
                password = %password,
                "Seeded default super admin with a generated password; set ADMIN_PASSWORD or change it"
            );
        } else {
            info!(admin_id = admin.id, "Seeded default super admin");
        }

        Ok(Some(admin))
    }
}
