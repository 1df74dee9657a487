//! Server configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `PORT` | Listen port | `8000` |
//! | `DATABASE_URL` | MongoDB connection string | unset → degraded mode |
//! | `DATABASE_NAME` | Database name | unset → degraded mode |
//! | `LOG_LEVEL` | tracing env-filter directive | `info` |
//! | `LOG_JSON` | JSON log output (`1`/`true`) | pretty output |
//!
//! Missing database variables are not an error: the server starts in a
//! degraded mode where store-dependent endpoints fail per-request.

use thiserror::Error;

use crate::logging::LogConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `PORT` variable was set but not a valid port number.
    #[error("Invalid PORT value '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// MongoDB connection string, if configured.
    pub database_url: Option<String>,
    /// Database name, if configured.
    pub database_name: Option<String>,
    /// Logging configuration.
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match read_env("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let log = LogConfig {
            level: read_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            json_format: read_env("LOG_JSON")
                .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
        };

        Ok(Self {
            port,
            database_url: read_env("DATABASE_URL"),
            database_name: read_env("DATABASE_NAME"),
            log,
        })
    }

    /// Returns the socket address string to bind to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Returns `true` when both database variables are configured.
    #[must_use]
    pub fn database_configured(&self) -> bool {
        self.database_url.is_some() && self.database_name.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            database_name: None,
            log: LogConfig::default(),
        }
    }
}

/// Reads an environment variable, treating empty values as unset.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(!config.database_configured());
    }

    #[test]
    fn test_database_configured() {
        let config = AppConfig {
            database_url: Some("mongodb://localhost:27017".into()),
            database_name: Some("amberarctic".into()),
            ..AppConfig::default()
        };
        assert!(config.database_configured());

        let partial = AppConfig {
            database_url: Some("mongodb://localhost:27017".into()),
            ..AppConfig::default()
        };
        assert!(!partial.database_configured());
    }

    #[test]
    fn test_invalid_port_error_display() {
        let err = ConfigError::InvalidPort("eight-thousand".into());
        assert!(err.to_string().contains("eight-thousand"));
    }
}
