//! # affiliate-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_password, hash_password, verify_password, Claims, IssuedToken, JwtService,
    PasswordService, PrincipalKind,
};
pub use config::{
    AdminSeedConfig, AffiliateConfig, AppConfig, AppSettings, ConfigError, CorsConfig,
    DatabaseBackend, DatabaseConfig, EmailConfig, Environment, JwtConfig, RateLimitConfig,
    ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
