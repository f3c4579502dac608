//! Settings service
//!
//! Key/value settings editable at runtime. Anyone with an admin token may
//! read them; only super admins may write.

use affiliate_core::entities::{AdminUser, SystemSetting};
use affiliate_core::error::DomainError;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{SettingResponse, UpdateSettingRequest};

use super::auth::require_super_admin;
use super::context::ServiceContext;
use super::error::ServiceResult;

const MAX_KEY_LEN: usize = 100;

pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

/// Keys are lower-case identifiers such as `default_commission_rate`
fn validate_key(key: &str) -> Result<(), DomainError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'.');
    if valid {
        Ok(())
    } else {
        Err(DomainError::ValidationError(format!(
            "invalid setting key '{key}'"
        )))
    }
}

/// Normalize and check values of settings with a known meaning
fn validate_value(key: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if key == SystemSetting::DEFAULT_COMMISSION_RATE {
        let rate: f64 = value.parse().map_err(|_| {
            DomainError::ValidationError(format!("{key} must be a number"))
        })?;
        DomainError::check_commission_rate(rate)?;
    }
    Ok(value.to_string())
}

impl<'a> SettingsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> ServiceResult<Vec<SettingResponse>> {
        let settings = self.ctx.settings_repo().list().await?;
        Ok(settings.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, key: &str) -> ServiceResult<SettingResponse> {
        let setting = self
            .ctx
            .settings_repo()
            .get(key)
            .await?
            .ok_or_else(|| DomainError::SettingNotFound(key.to_string()))?;
        Ok(setting.into())
    }

    #[instrument(skip(self, admin, request), fields(admin_id = admin.id))]
    pub async fn update(
        &self,
        admin: &AdminUser,
        key: &str,
        request: UpdateSettingRequest,
    ) -> ServiceResult<SettingResponse> {
        require_super_admin(admin)?;
        validate_key(key)?;
        let value = validate_value(key, &request.value)?;

        let setting = self.ctx.settings_repo().set(key, &value, Utc::now()).await?;
        info!(key, value = %setting.value, "Setting updated");
        Ok(setting.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use affiliate_core::value_objects::AdminRole;

    fn value(v: &str) -> UpdateSettingRequest {
        UpdateSettingRequest {
            value: v.to_string(),
        }
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("default_commission_rate").is_ok());
        assert!(validate_key("payouts.minimum").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("Bad Key").is_err());
    }

    #[test]
    fn test_validate_commission_value() {
        assert_eq!(
            validate_value(SystemSetting::DEFAULT_COMMISSION_RATE, " 12.5 ").unwrap(),
            "12.5"
        );
        assert!(validate_value(SystemSetting::DEFAULT_COMMISSION_RATE, "abc").is_err());
        assert!(validate_value(SystemSetting::DEFAULT_COMMISSION_RATE, "120").is_err());
        assert_eq!(validate_value("welcome_banner", " hi ").unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_only_super_admins_write() {
        let (ctx, _) = testing::context().await;
        let admin = testing::admin(&ctx, AdminRole::Admin).await;
        let root = testing::admin(&ctx, AdminRole::SuperAdmin).await;
        let service = SettingsService::new(&ctx);

        let err = service
            .update(&admin, SystemSetting::DEFAULT_COMMISSION_RATE, value("20"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let updated = service
            .update(&root, SystemSetting::DEFAULT_COMMISSION_RATE, value("20"))
            .await
            .unwrap();
        assert_eq!(updated.value, "20");

        let fetched = service.get(SystemSetting::DEFAULT_COMMISSION_RATE).await.unwrap();
        assert_eq!(fetched.value, "20");
        assert_eq!(service.list().await.unwrap().len(), 1);

        let err = service.get("missing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
