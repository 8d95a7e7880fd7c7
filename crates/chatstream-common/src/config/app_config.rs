//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub cors: CorsConfig,
    pub registration: RegistrationConfig,
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

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
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

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Message store behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Deadline for a single unit of work, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Pending registration settings
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// How long a verification token stays valid, in seconds
    #[serde(default = "default_registration_ttl")]
    pub ttl_secs: u64,
    /// Interval between sweeps of expired registrations, in seconds
    #[serde(default = "default_registration_sweep")]
    pub sweep_interval_secs: u64,
    /// Link target embedded in verification mails
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
}

impl RegistrationConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_registration_ttl(),
            sweep_interval_secs: default_registration_sweep(),
            verify_url: default_verify_url(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "chatstream".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_migrations_dir() -> String {
    "./crates/chatstream-db/migrations".to_string()
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_registration_ttl() -> u64 {
    86400 // 24 hours
}

fn default_registration_sweep() -> u64 {
    300
}

fn default_verify_url() -> String {
    "http://localhost:5173/FinnishRegister".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_required(&lookup, "API_PORT")?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", default_run_migrations)?,
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR").unwrap_or_else(default_migrations_dir),
            },
            store: StoreConfig {
                timeout_ms: parse_or(&lookup, "STORE_TIMEOUT_MS", default_store_timeout_ms)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            registration: RegistrationConfig {
                ttl_secs: parse_or(&lookup, "REGISTRATION_TTL_SECS", default_registration_ttl)?,
                sweep_interval_secs: parse_or(
                    &lookup,
                    "REGISTRATION_SWEEP_SECS",
                    default_registration_sweep,
                )?,
                verify_url: lookup("REGISTRATION_VERIFY_URL").unwrap_or_else(default_verify_url),
            },
        })
    }
}

fn parse_required<F, T>(lookup: &F, key: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key).ok_or(ConfigError::MissingVar(key))?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, raw))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
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
