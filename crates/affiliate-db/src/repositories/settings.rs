//! SQL implementation of SettingsRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use affiliate_core::entities::SystemSetting;
use affiliate_core::traits::{RepoResult, SettingsRepository};

use crate::models::SettingModel;
use crate::pool::{with_pool, Database};

use super::error::map_db_error;

/// SQL implementation of SettingsRepository
#[derive(Clone)]
pub struct SqlSettingsRepository {
    db: Database,
}

impl SqlSettingsRepository {
    /// Create a new SqlSettingsRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for SqlSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> RepoResult<Option<SystemSetting>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, SettingModel>(
                "SELECT key, value, updated_at FROM system_settings WHERE key = $1",
            )
            .bind(key)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(result.map(SystemSetting::from))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str, at: DateTime<Utc>) -> RepoResult<SystemSetting> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, SettingModel>(
                r"
                INSERT INTO system_settings (key, value, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (key) DO UPDATE
                SET value = excluded.value, updated_at = excluded.updated_at
                RETURNING key, value, updated_at
                ",
            )
            .bind(key)
            .bind(value)
            .bind(at)
            .fetch_one(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(SystemSetting::from(model))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<SystemSetting>> {
        let models = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, SettingModel>(
                "SELECT key, value, updated_at FROM system_settings ORDER BY key",
            )
            .fetch_all(pool)
            .await
        })
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(SystemSetting::from).collect())
    }
}
