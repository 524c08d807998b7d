//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2025-01)
//! - `SYNC_INTERVAL_SECS` - Scheduled sync period in seconds (default: 120)
//! - `SYNC_SCHEDULER_ENABLED` - Set to `false` to disable the background
//!   scheduler (default: true)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_VERSION: &str = "2025-01";
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 120;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API version used for all tenant fetches
    pub shopify_api_version: String,
    /// Period between scheduled sync passes
    pub sync_interval: Duration,
    /// Whether the background scheduler runs at all
    pub scheduler_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = SecretString::from(require_env("DATABASE_URL")?);

        let host = parse_env("HOST", DEFAULT_HOST)?;
        let port = parse_env("PORT", DEFAULT_PORT)?;
        let shopify_api_version =
            std::env::var("SHOPIFY_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.into());
        let sync_interval_secs = parse_env("SYNC_INTERVAL_SECS", DEFAULT_SYNC_INTERVAL_SECS)?;
        let scheduler_enabled = parse_env("SYNC_SCHEDULER_ENABLED", true)?;

        Ok(Self {
            database_url,
            host,
            port,
            shopify_api_version,
            sync_interval: Duration::from_secs(sync_interval_secs),
            scheduler_enabled,
        })
    }

    /// The socket address to bind the HTTP server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

/// Read an optional variable, parsing it into its target type.
fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: SecretString::from("postgres://localhost/test".to_string()),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            shopify_api_version: DEFAULT_API_VERSION.to_string(),
            sync_interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            scheduler_enabled: true,
        }
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = test_config();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn debug_redacts_database_url() {
        let config = test_config();
        let debug = format!("{config:?}");
        assert!(!debug.contains("postgres://localhost/test"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::MissingEnvVar("DATABASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: DATABASE_URL"
        );
    }
}
