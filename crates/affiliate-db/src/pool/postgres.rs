//! PostgreSQL connection pool management

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::PoolConfig;

/// Create a new PostgreSQL connection pool
pub async fn create_pg_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await
}
