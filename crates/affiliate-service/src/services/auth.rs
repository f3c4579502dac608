//! Authentication service
//!
//! Handles affiliate and admin login, and resolves bearer tokens to live
//! principals for the HTTP extractors.

use affiliate_common::auth::{Claims, PrincipalKind};
use affiliate_common::AppError;
use affiliate_core::entities::{normalize_email, AdminUser, Affiliate};
use affiliate_core::error::DomainError;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dto::mappers::affiliate_response;
use crate::dto::{AdminLoginResponse, AffiliateLoginResponse, LoginRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with the credentials issued at approval
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn affiliate_login(&self, request: LoginRequest) -> ServiceResult<AffiliateLoginResponse> {
        let email = normalize_email(&request.email);

        let credential = self
            .ctx
            .affiliate_repo()
            .find_credential_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "Affiliate login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &credential.password_hash)
            .inspect_err(|_| {
                warn!(affiliate_id = credential.affiliate_id, "Affiliate login failed: invalid password");
            })?;

        let affiliate = self
            .ctx
            .affiliate_repo()
            .find_by_id(credential.affiliate_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !affiliate.is_active() {
            warn!(affiliate_id = affiliate.id, status = %affiliate.status, "Affiliate login refused: account not active");
            return Err(DomainError::AffiliateNotActive.into());
        }

        self.ctx
            .affiliate_repo()
            .touch_last_login(affiliate.id, Utc::now())
            .await?;

        let token = self.ctx.jwt_service().issue(
            PrincipalKind::Affiliate,
            affiliate.id,
            &affiliate.email,
            None,
        )?;

        info!(affiliate_id = affiliate.id, "Affiliate logged in");

        Ok(AffiliateLoginResponse {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            affiliate: affiliate_response(&affiliate, &self.ctx.settings().frontend_url),
        })
    }

    /// Login as an administrator
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn admin_login(&self, request: LoginRequest) -> ServiceResult<AdminLoginResponse> {
        let email = normalize_email(&request.email);

        let admin = self
            .ctx
            .admin_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "Admin login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .admin_repo()
            .get_password_hash(admin.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| {
                warn!(admin_id = admin.id, "Admin login failed: invalid password");
            })?;

        let token = self.ctx.jwt_service().issue(
            PrincipalKind::Admin,
            admin.id,
            &admin.email,
            Some(admin.role.as_str()),
        )?;

        info!(admin_id = admin.id, role = %admin.role, "Admin logged in");

        Ok(AdminLoginResponse {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            admin: (&admin).into(),
        })
    }

    /// Resolve an affiliate bearer token to an active affiliate
    ///
    /// # Errors
    /// 401 for bad tokens or a deleted affiliate, 403 for admin tokens or an
    /// affiliate that is no longer active
    pub async fn authenticate_affiliate(&self, token: &str) -> ServiceResult<Affiliate> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_kind(token, PrincipalKind::Affiliate)?;
        self.affiliate_for_claims(&claims).await
    }

    /// Resolve an admin bearer token to an existing admin
    pub async fn authenticate_admin(&self, token: &str) -> ServiceResult<AdminUser> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_kind(token, PrincipalKind::Admin)?;
        self.admin_for_claims(&claims).await
    }

    async fn affiliate_for_claims(&self, claims: &Claims) -> ServiceResult<Affiliate> {
        let id = claims.principal_id()?;
        let affiliate = self
            .ctx
            .affiliate_repo()
            .find_by_id(id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !affiliate.is_active() {
            return Err(DomainError::AffiliateNotActive.into());
        }
        Ok(affiliate)
    }

    async fn admin_for_claims(&self, claims: &Claims) -> ServiceResult<AdminUser> {
        let id = claims.principal_id()?;
        let admin = self
            .ctx
            .admin_repo()
            .find_by_id(id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        Ok(admin)
    }
}

/// Require the `super_admin` role
pub fn require_super_admin(admin: &AdminUser) -> ServiceResult<()> {
    if admin.is_super_admin() {
        Ok(())
    } else {
        Err(DomainError::InsufficientRole("super_admin").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ReviewApplicationRequest;
    use crate::services::{testing, ApplicationService, ReviewService};
    use affiliate_common::auth::JwtService;
    use affiliate_core::value_objects::{AdminRole, AffiliateStatus};
    use serde_json::json;

    async fn approved_affiliate(ctx: &ServiceContext, email: &str) -> (Affiliate, String) {
        let admin = ctx.admin_repo().find_by_email("admin@example.com").await.unwrap();
        let admin = match admin {
            Some(admin) => admin,
            None => testing::admin(ctx, AdminRole::Admin).await,
        };
        let request = serde_json::from_value(json!({"fullName": "Alan Turing", "email": email})).unwrap();
        let id = ApplicationService::new(ctx).submit(request).await.unwrap().id;
        let response = ReviewService::new(ctx)
            .review(
                admin.id,
                id,
                ReviewApplicationRequest {
                    status: "approved".to_string(),
                    commission_rate: Some(12.0),
                    notes: None,
                },
            )
            .await
            .unwrap();
        let affiliate = ctx
            .affiliate_repo()
            .find_by_id(response.affiliate.unwrap().id)
            .await
            .unwrap()
            .unwrap();
        (affiliate, response.issued_password.unwrap_or_default())
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_affiliate_login_round_trip() {
        let (ctx, mailer) = testing::context().await;
        let (affiliate, _) = approved_affiliate(&ctx, "alan@example.com").await;
        let password = mailer.issued_password("alan@example.com").unwrap();
        let service = AuthService::new(&ctx);

        let response = service
            .affiliate_login(login("ALAN@example.com", &password))
            .await
            .unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.affiliate.id, affiliate.id);

        let current = service.authenticate_affiliate(&response.token).await.unwrap();
        assert_eq!(current.id, affiliate.id);

        let credential = ctx
            .affiliate_repo()
            .find_credential_by_email("alan@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(credential.last_login_at.is_some());

        // An affiliate token is not an admin token
        let err = service.authenticate_admin(&response.token).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let (ctx, _) = testing::context().await;
        approved_affiliate(&ctx, "alan@example.com").await;
        let service = AuthService::new(&ctx);

        let err = service
            .affiliate_login(login("alan@example.com", "wrong-password"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");

        let err = service
            .affiliate_login(login("ghost@example.com", "whatever"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_suspended_affiliate_is_locked_out() {
        let (ctx, mailer) = testing::context().await;
        let (affiliate, _) = approved_affiliate(&ctx, "alan@example.com").await;
        let password = mailer.issued_password("alan@example.com").unwrap();
        let service = AuthService::new(&ctx);

        let token = service
            .affiliate_login(login("alan@example.com", &password))
            .await
            .unwrap()
            .token;

        ctx.affiliate_repo()
            .update_status(affiliate.id, AffiliateStatus::Suspended, Utc::now())
            .await
            .unwrap();

        let err = service.authenticate_affiliate(&token).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = service
            .affiliate_login(login("alan@example.com", &password))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AFFILIATE_NOT_ACTIVE");
    }

    #[tokio::test]
    async fn test_admin_login_and_roles() {
        let (ctx, _) = testing::context().await;
        let admin = testing::admin(&ctx, AdminRole::Admin).await;
        let service = AuthService::new(&ctx);

        let response = service
            .admin_login(login("admin@example.com", testing::ADMIN_PASSWORD))
            .await
            .unwrap();
        assert_eq!(response.admin.role, AdminRole::Admin);

        let claims = ctx.jwt_service().decode_token(&response.token).unwrap();
        assert_eq!(claims.kind, PrincipalKind::Admin);
        assert_eq!(claims.role.as_deref(), Some("admin"));

        let current = service.authenticate_admin(&response.token).await.unwrap();
        assert_eq!(current.id, admin.id);

        let err = service.authenticate_affiliate(&response.token).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        assert!(require_super_admin(&current).is_err());
        let root = testing::admin(&ctx, AdminRole::SuperAdmin).await;
        assert!(require_super_admin(&root).is_ok());
    }

    #[tokio::test]
    async fn test_tokens_for_missing_principals() {
        let (ctx, _) = testing::context().await;
        let service = AuthService::new(&ctx);

        let token = ctx
            .jwt_service()
            .issue(PrincipalKind::Affiliate, 4242, "ghost@example.com", None)
            .unwrap()
            .token;
        let err = service.authenticate_affiliate(&token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let foreign = JwtService::new("other-secret", 3600)
            .issue(PrincipalKind::Admin, 1, "a@example.com", Some("admin"))
            .unwrap()
            .token;
        let err = service.authenticate_admin(&foreign).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TOKEN");

        let err = service.authenticate_admin("not-a-jwt").await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
