//! SQL implementation of AdminRepository

use async_trait::async_trait;
use tracing::instrument;

use affiliate_core::entities::{AdminUser, NewAdminUser};
use affiliate_core::error::DomainError;
use affiliate_core::traits::{AdminRepository, RepoResult};

use crate::models::AdminModel;
use crate::pool::{with_pool, Database};

use super::error::{map_db_error, map_unique_violation};

/// SQL implementation of AdminRepository
#[derive(Clone)]
pub struct SqlAdminRepository {
    db: Database,
}

impl SqlAdminRepository {
    /// Create a new SqlAdminRepository
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for SqlAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<AdminUser>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AdminModel>(
                r"
                SELECT id, email, full_name, role, created_at, updated_at
                FROM admin_users
                WHERE id = $1
                ",
            )
            .bind(id)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(AdminUser::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<AdminUser>> {
        let result = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AdminModel>(
                r"
                SELECT id, email, full_name, role, created_at, updated_at
                FROM admin_users
                WHERE email = $1
                ",
            )
            .bind(email)
            .fetch_optional(pool)
            .await
        })
        .map_err(map_db_error)?;

        result.map(AdminUser::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        with_pool!(&self.db, pool => {
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM admin_users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .map_err(map_db_error)
    }

    #[instrument(skip(self, admin, password_hash), fields(email = %admin.email))]
    async fn create(&self, admin: &NewAdminUser, password_hash: &str) -> RepoResult<AdminUser> {
        let model = with_pool!(&self.db, pool => {
            sqlx::query_as::<_, AdminModel>(
                r"
                INSERT INTO admin_users (email, full_name, password_hash, role, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING id, email, full_name, role, created_at, updated_at
                ",
            )
            .bind(&admin.email)
            .bind(&admin.full_name)
            .bind(password_hash)
            .bind(admin.role.as_str())
            .bind(admin.created_at)
            .fetch_one(pool)
            .await
        })
        .map_err(|e| map_unique_violation(e, || DomainError::AdminEmailExists))?;

        AdminUser::try_from(model)
    }
}
