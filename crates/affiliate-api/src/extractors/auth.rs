//! Authentication extractors
//!
//! Resolve the bearer token to a live principal. The token kind decides which
//! extractor accepts it; a token for the other kind is rejected with 403.

use affiliate_core::{AdminUser, Affiliate};
use affiliate_service::AuthService;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingAuth)?;
    Ok(bearer.token().to_string())
}

/// Active affiliate behind an affiliate token
#[derive(Debug, Clone)]
pub struct AffiliateAuth(pub Affiliate);

#[async_trait]
impl<S> FromRequestParts<S> for AffiliateAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let affiliate = AuthService::new(app_state.service_context())
            .authenticate_affiliate(&token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Affiliate authentication failed");
                e
            })?;

        Ok(Self(affiliate))
    }
}

/// Admin behind an admin token
#[derive(Debug, Clone)]
pub struct AdminAuth(pub AdminUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let admin = AuthService::new(app_state.service_context())
            .authenticate_admin(&token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Admin authentication failed");
                e
            })?;

        Ok(Self(admin))
    }
}
