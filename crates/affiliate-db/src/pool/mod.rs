//! Database connection pool management
//!
//! [`Database`] wraps either a PostgreSQL or a SQLite pool, chosen from the
//! connection URL. Repositories hold a clone of it and dispatch each query to
//! the active backend.

mod postgres;
mod sqlite;

use std::sync::Arc;
use std::time::Duration;

use affiliate_common::config::{DatabaseBackend, DatabaseConfig};
use tracing::info;

pub use postgres::create_pg_pool;
pub use sqlite::create_sqlite_pool;

// Re-export pool types for convenience
pub use sqlx::postgres::PgPool;
pub use sqlx::sqlite::SqlitePool;

use crate::repositories::{
    SqlAdminRepository, SqlAffiliateRepository, SqlApplicationRepository, SqlPaymentRepository,
    SqlProgramRepository, SqlReferralRepository, SqlSettingsRepository,
};
use affiliate_core::traits::{
    AdminRepository, AffiliateRepository, ApplicationRepository, PaymentRepository,
    ProgramRepository, ReferralRepository, SettingsRepository,
};

const POSTGRES_SCHEMA: &str = include_str!("../../schema/postgres.sql");
const SQLITE_SCHEMA: &str = include_str!("../../schema/sqlite.sql");

/// Run one body against whichever pool backs a [`Database`]
///
/// The body is compiled once per backend, so query builders infer the right
/// driver from the pool they execute on.
macro_rules! with_pool {
    ($db:expr, $pool:ident => $body:expr) => {
        match $db {
            $crate::pool::Database::Postgres($pool) => $body,
            $crate::pool::Database::Sqlite($pool) => $body,
        }
    };
}

pub(crate) use with_pool;

/// Pool sizing and timeouts
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connection URL (`postgres://…` or `sqlite:…`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl PoolConfig {
    pub fn new(url: impl Into<String>, max_connections: u32, min_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self::new(&config.url, config.max_connections, config.min_connections)
    }
}

/// Connected database handle
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Every repository, backed by one database handle
#[derive(Clone)]
pub struct Repositories {
    pub applications: Arc<dyn ApplicationRepository>,
    pub affiliates: Arc<dyn AffiliateRepository>,
    pub referrals: Arc<dyn ReferralRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub programs: Arc<dyn ProgramRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub admins: Arc<dyn AdminRepository>,
}

impl Database {
    /// Connect to the database described by the application config
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool_config = PoolConfig::from(config);
        let db = match config.backend {
            DatabaseBackend::Postgres => Self::Postgres(create_pg_pool(&pool_config).await?),
            DatabaseBackend::Sqlite => Self::Sqlite(create_sqlite_pool(&pool_config).await?),
        };
        info!(backend = ?db.backend(), "Database pool created");
        Ok(db)
    }

    /// Private in-memory SQLite database with the schema applied
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let db = Self::Sqlite(create_sqlite_pool(&PoolConfig::new("sqlite::memory:", 1, 1)).await?);
        db.init_schema().await?;
        Ok(db)
    }

    #[must_use]
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Postgres(_) => DatabaseBackend::Postgres,
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
        }
    }

    /// Create missing tables and indexes
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(pool) => {
                sqlx::raw_sql(POSTGRES_SCHEMA).execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::raw_sql(SQLITE_SCHEMA).execute(pool).await?;
            }
        }
        info!(backend = ?self.backend(), "Database schema ready");
        Ok(())
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        with_pool!(self, pool => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()))
    }

    /// Build all repositories on this handle
    #[must_use]
    pub fn repositories(&self) -> Repositories {
        Repositories {
            applications: Arc::new(SqlApplicationRepository::new(self.clone())),
            affiliates: Arc::new(SqlAffiliateRepository::new(self.clone())),
            referrals: Arc::new(SqlReferralRepository::new(self.clone())),
            payments: Arc::new(SqlPaymentRepository::new(self.clone())),
            programs: Arc::new(SqlProgramRepository::new(self.clone())),
            settings: Arc::new(SqlSettingsRepository::new(self.clone())),
            admins: Arc::new(SqlAdminRepository::new(self.clone())),
        }
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        with_pool!(self, pool => pool.close().await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_defaults() {
        let config = PoolConfig::new("sqlite::memory:", 10, 1);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::in_memory().await.unwrap();
        assert_eq!(db.backend(), DatabaseBackend::Sqlite);
        db.ping().await.unwrap();
        // Schema creation is idempotent
        db.init_schema().await.unwrap();
    }
}
