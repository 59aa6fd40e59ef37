//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub reviews: ReviewSettings,
    /// Per-request timeout applied by the HTTP layer
    pub request_timeout_secs: u64,
    /// User granted the super admin role at startup
    pub bootstrap_super_admin: Option<i64>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
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

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where reviews are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store, for local runs and tests
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory holding the SQL migrations applied at startup
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Review listing and ranking settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSettings {
    /// Approved reviews a restaurant needs before it can appear in top-rated lists
    #[serde(default = "default_top_rated_min_reviews")]
    pub top_rated_min_reviews: i64,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            top_rated_min_reviews: default_top_rated_min_reviews(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "review-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_top_rated_min_reviews() -> i64 {
    3
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = match lookup("APP_ENV").map(|s| s.to_lowercase()) {
            None => Environment::default(),
            Some(s) => match s.as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let storage = match lookup("STORAGE_BACKEND").map(|s| s.to_lowercase()) {
            None => StorageBackend::default(),
            Some(s) => match s.as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let database = match (lookup("DATABASE_URL"), storage) {
            (Some(url), _) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: lookup("MIGRATIONS_DIR").unwrap_or_else(default_migrations_dir),
            }),
            (None, StorageBackend::Postgres) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (None, StorageBackend::Memory) => None,
        };

        let reviews = ReviewSettings {
            top_rated_min_reviews: parse_or(&lookup, "TOP_RATED_MIN_REVIEWS", default_top_rated_min_reviews)?,
            default_page_size: parse_or(&lookup, "DEFAULT_PAGE_SIZE", default_page_size)?,
            max_page_size: parse_or(&lookup, "MAX_PAGE_SIZE", default_max_page_size)?,
        };
        if reviews.default_page_size == 0 || reviews.default_page_size > reviews.max_page_size {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_PAGE_SIZE",
                reviews.default_page_size.to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "SERVER_PORT", default_port)?,
            },
            storage,
            database,
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(&lookup, "RATE_LIMIT_PER_SECOND", default_requests_per_second)?,
                burst: parse_or(&lookup, "RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).filter(|o| !o.is_empty()).map(String::from).collect())
                    .unwrap_or_default(),
            },
            reviews,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", default_request_timeout_secs)?,
            bootstrap_super_admin: lookup("BOOTSTRAP_SUPER_ADMIN")
                .map(|raw| {
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("BOOTSTRAP_SUPER_ADMIN", raw))
                })
                .transpose()?,
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
