//! Structured logging initialization.
//!
//! Wires `tracing` through `tracing-subscriber` with an env-filter level
//! and either JSON (production) or pretty (development) formatting.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level string was not a valid filter directive.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Env-filter directive (e.g. "info", "amberarctic_server=debug").
    pub level: String,
    /// Whether to emit JSON-formatted output.
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup, before any request handling.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidLevel(e.to_string()))?;

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter);
        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter);
        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LogConfig {
            level: "not-a-[level".to_string(),
            json_format: false,
        };
        assert!(matches!(
            init_logging(&config),
            Err(LoggingError::InvalidLevel(_))
        ));
    }
}
