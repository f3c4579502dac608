//! Application configuration structs
//!
//! Loads configuration from environment variables (and an optional `.env` file).

use std::env;
use std::fmt;
use std::str::FromStr;

/// Secret used when `JWT_SECRET` is unset outside production
const DEV_JWT_SECRET: &str = "dev-only-affiliate-jwt-secret-change-me";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub admin: AdminSeedConfig,
    pub affiliate: AffiliateConfig,
    /// Directory holding the built frontend bundle, served when set
    pub static_dir: Option<String>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" | "test" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which SQL engine a database URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            Err(ConfigError::InvalidValue(
                "DATABASE_URL",
                "expected a postgres:// or sqlite: URL".to_string(),
            ))
        }
    }
}

/// Database configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub backend: DatabaseBackend,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// SQLite file URL for a path on disk
    #[must_use]
    pub fn sqlite_file_url(path: &str) -> String {
        format!("sqlite://{path}")
    }

    /// Private in-memory SQLite database
    #[must_use]
    pub fn sqlite_in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            backend: DatabaseBackend::Sqlite,
            max_connections: 1,
            min_connections: 1,
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.backend == DatabaseBackend::Sqlite && self.url.contains(":memory:")
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Postgres URLs may carry a password
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish_non_exhaustive()
    }
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    /// True when the development fallback secret is in use
    pub insecure_secret: bool,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("expires_in", &self.expires_in)
            .field("insecure_secret", &self.insecure_secret)
            .finish_non_exhaustive()
    }
}

/// Outgoing mail (SMTP) configuration
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP relay host; mail is only logged when unset
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    /// Implicit TLS (SMTPS) instead of STARTTLS
    pub secure: bool,
}

impl EmailConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_email_port(),
            username: None,
            password: None,
            from: default_email_from(),
            secure: false,
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from", &self.from)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Default super admin created at startup
#[derive(Clone)]
pub struct AdminSeedConfig {
    pub email: String,
    pub full_name: String,
    /// Generated (and logged once) when unset
    pub password: Option<String>,
}

impl fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

/// Affiliate program settings
#[derive(Debug, Clone)]
pub struct AffiliateConfig {
    /// Fallback commission percentage when neither the review nor the
    /// `default_commission_rate` setting provides one
    pub default_commission_rate: f64,
    /// Public frontend address used in emails and referral links
    pub frontend_url: String,
}

// Default value functions
fn default_app_name() -> String {
    "affiliate-server".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_sqlite_path() -> String {
    "./data/affiliates.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_jwt_expiry() -> i64 {
    7 * 24 * 60 * 60 // 7 days
}

fn default_email_port() -> u16 {
    587
}

fn default_email_from() -> String {
    "Affiliate Program <noreply@affiliates.local>".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_admin_email() -> String {
    "admin@affiliates.local".to_string()
}

fn default_commission_rate() -> f64 {
    10.0
}

/// Parse a token lifetime: plain seconds ("3600") or a humantime span ("7d", "12h")
pub fn parse_expiry(value: &str) -> Result<i64, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::InvalidValue("JWT_EXPIRES_IN", value.to_string());

    let secs = if value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse::<i64>().map_err(|_| invalid())?
    } else {
        let duration = humantime::parse_duration(value).map_err(|_| invalid())?;
        i64::try_from(duration.as_secs()).map_err(|_| invalid())?
    };

    if secs <= 0 {
        return Err(invalid());
    }
    Ok(secs)
}

/// Typed access to a key/value source of settings
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Non-blank value of a variable
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse a variable if present; an unparseable value is an error
    fn parse<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| ConfigError::InvalidValue(name, raw.clone()))
            })
            .transpose()
    }

    fn flag(&self, name: &'static str) -> Result<Option<bool>, ConfigError> {
        self.get(name)
            .map(|raw| match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue(name, raw.clone())),
            })
            .transpose()
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let env = vars
            .get("APP_ENV")
            .map(|s| s.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let port = match vars.parse::<u16>("PORT")? {
            Some(port) => port,
            None => vars.parse::<u16>("API_PORT")?.unwrap_or_else(default_port),
        };

        let database_url = vars.get("DATABASE_URL").unwrap_or_else(|| {
            DatabaseConfig::sqlite_file_url(
                &vars.get("SQLITE_PATH").unwrap_or_else(default_sqlite_path),
            )
        });
        let backend = DatabaseBackend::from_url(&database_url)?;

        let (secret, insecure_secret) = match vars.get("JWT_SECRET") {
            Some(secret) => (secret, false),
            None if env.is_production() => return Err(ConfigError::MissingVar("JWT_SECRET")),
            None => (DEV_JWT_SECRET.to_string(), true),
        };

        let expires_in = vars
            .get("JWT_EXPIRES_IN")
            .map(|s| parse_expiry(&s))
            .transpose()?
            .unwrap_or_else(default_jwt_expiry);

        let email_port = vars.parse::<u16>("EMAIL_PORT")?.unwrap_or_else(default_email_port);

        let default_commission_rate = vars
            .parse::<f64>("DEFAULT_COMMISSION_RATE")?
            .unwrap_or_else(default_commission_rate);
        if !(0.0..=100.0).contains(&default_commission_rate) {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_COMMISSION_RATE",
                default_commission_rate.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: database_url,
                backend,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            jwt: JwtConfig {
                secret,
                expires_in,
                insecure_secret,
            },
            email: EmailConfig {
                host: vars.get("EMAIL_HOST"),
                port: email_port,
                username: vars.get("EMAIL_USER"),
                password: vars.get("EMAIL_PASSWORD"),
                from: vars.get("EMAIL_FROM").unwrap_or_else(default_email_from),
                secure: vars.flag("EMAIL_SECURE")?.unwrap_or(email_port == 465),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: vars.parse("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            admin: AdminSeedConfig {
                email: vars
                    .get("ADMIN_EMAIL")
                    .map(|e| e.to_lowercase())
                    .unwrap_or_else(default_admin_email),
                full_name: vars
                    .get("ADMIN_NAME")
                    .unwrap_or_else(|| "Platform Admin".to_string()),
                password: vars.get("ADMIN_PASSWORD"),
            },
            affiliate: AffiliateConfig {
                default_commission_rate,
                frontend_url: vars
                    .get("FRONTEND_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_frontend_url),
            },
            static_dir: vars.get("STATIC_DIR"),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
