//! # affiliate-db
//!
//! Database layer implementing the affiliate-core repository traits via SQLx,
//! on PostgreSQL or SQLite.
//!
//! ## Overview
//!
//! - Connection pool management and schema creation ([`Database`])
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use affiliate_common::AppConfig;
//! use affiliate_db::Database;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let db = Database::connect(&config.database).await?;
//!     db.init_schema().await?;
//!     let repos = db.repositories();
//!
//!     // Use the repositories...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pg_pool, create_sqlite_pool, Database, PgPool, PoolConfig, Repositories, SqlitePool};
pub use repositories::{
    SqlAdminRepository, SqlAffiliateRepository, SqlApplicationRepository, SqlPaymentRepository,
    SqlProgramRepository, SqlReferralRepository, SqlSettingsRepository,
};
