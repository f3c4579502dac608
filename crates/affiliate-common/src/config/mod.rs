//! Configuration structs

mod app_config;

pub use app_config::{
    parse_expiry, AdminSeedConfig, AffiliateConfig, AppConfig, AppSettings, ConfigError,
    CorsConfig, DatabaseBackend, DatabaseConfig, EmailConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig,
};
