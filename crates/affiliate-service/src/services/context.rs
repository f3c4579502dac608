//! Service context - dependency container for services
//!
//! Holds the database handle, all repositories, the JWT service, and the mailer.

use std::sync::Arc;

use affiliate_common::auth::{JwtService, PasswordService};
use affiliate_common::config::AppConfig;
use affiliate_core::traits::{
    AdminRepository, AffiliateRepository, ApplicationRepository, PaymentRepository,
    ProgramRepository, ReferralRepository, SettingsRepository,
};
use affiliate_db::{Database, Repositories};
use affiliate_mail::Mailer;

use super::error::{ServiceError, ServiceResult};

/// Values services read from configuration
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Name used in outgoing mail
    pub app_name: String,
    /// Frontend base URL for login and referral links
    pub frontend_url: String,
    /// Commission percentage used when neither the review nor the settings table names one
    pub default_commission_rate: f64,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            app_name: config.app.name.clone(),
            frontend_url: config.affiliate.frontend_url.clone(),
            default_commission_rate: config.affiliate.default_commission_rate,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            app_name: "affiliate-server".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            default_commission_rate: 10.0,
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    database: Database,

    // Repositories
    application_repo: Arc<dyn ApplicationRepository>,
    affiliate_repo: Arc<dyn AffiliateRepository>,
    referral_repo: Arc<dyn ReferralRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    program_repo: Arc<dyn ProgramRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    admin_repo: Arc<dyn AdminRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    mailer: Arc<dyn Mailer>,

    settings: ServiceSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        database: Database,
        repositories: Repositories,
        jwt_service: Arc<JwtService>,
        mailer: Arc<dyn Mailer>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            database,
            application_repo: repositories.applications,
            affiliate_repo: repositories.affiliates,
            referral_repo: repositories.referrals,
            payment_repo: repositories.payments,
            program_repo: repositories.programs,
            settings_repo: repositories.settings,
            admin_repo: repositories.admins,
            jwt_service,
            password_service: PasswordService::new(),
            mailer,
            settings,
        }
    }

    /// Get the database handle
    pub fn database(&self) -> &Database {
        &self.database
    }

    // === Repositories ===

    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    pub fn affiliate_repo(&self) -> &dyn AffiliateRepository {
        self.affiliate_repo.as_ref()
    }

    pub fn referral_repo(&self) -> &dyn ReferralRepository {
        self.referral_repo.as_ref()
    }

    pub fn payment_repo(&self) -> &dyn PaymentRepository {
        self.payment_repo.as_ref()
    }

    pub fn program_repo(&self) -> &dyn ProgramRepository {
        self.program_repo.as_ref()
    }

    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the outgoing mailer
    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("database", &self.database.backend())
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    database: Option<Database>,
    repositories: Option<Repositories>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Arc<dyn Mailer>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Override the repositories built from the database handle
    pub fn repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let database = self
            .database
            .ok_or_else(|| ServiceError::validation("database is required"))?;
        let repositories = self
            .repositories
            .unwrap_or_else(|| database.repositories());

        Ok(ServiceContext::new(
            database,
            repositories,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
            self.settings.unwrap_or_default(),
        ))
    }
}
