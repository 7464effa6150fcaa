//! Root configuration type.

use crate::{ConfigError, Environment, LimitsConfig, LoggingConfig, ServerConfig};
use herald_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete Herald service configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use herald_config::HeraldConfig;
///
/// let config = HeraldConfig::default();
/// assert_eq!(config.server.port, 4000);
/// assert_eq!(config.limits.max_body_bytes, 1_048_576);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HeraldConfig {
    /// Server section.
    #[serde(default)]
    pub server: ServerConfig,

    /// Request limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging section.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HeraldConfig {
    /// Debug logging with pretty output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
            ..Self::default()
        }
    }

    /// Info logging with JSON output in the production environment.
    #[must_use]
    pub fn production() -> Self {
        Self {
            server: ServerConfig {
                env: Environment::Production,
                ..ServerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BadValue` if:
    /// - `server.port` is 0
    /// - `limits.max_body_bytes` is 0
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::bad_value(
                "server.port",
                "must be between 1 and 65535",
            ));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::bad_value(
                "limits.max_body_bytes",
                "must be greater than zero",
            ));
        }

        herald_telemetry::create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::bad_value("logging.level", e.to_string()))?;

        Ok(())
    }

    /// Graceful shutdown budget.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }

    /// Logging setup derived from this configuration.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let base = match self.logging.format {
            LogFormat::Pretty => LogConfig::development(),
            LogFormat::Json => LogConfig::production(),
        };

        base.with_level(self.logging.level.clone())
            .with_format(self.logging.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HeraldConfig::default().validate().is_ok());
        assert!(HeraldConfig::development().validate().is_ok());
        assert!(HeraldConfig::production().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = HeraldConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert_eq!(dev.logging.format, LogFormat::Pretty);

        let prod = HeraldConfig::production();
        assert_eq!(prod.server.env, Environment::Production);
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let mut config = HeraldConfig::default();
        config.limits.max_body_bytes = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limits.max_body_bytes"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = HeraldConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = HeraldConfig::default();
        config.logging.level = "herald=loudest".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_log_config() {
        let log = HeraldConfig::development().log_config();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Pretty);
        assert!(log.file_line_info);

        let log = HeraldConfig::default().log_config();
        assert_eq!(log.level, "info");
        assert_eq!(log.format, LogFormat::Json);
    }

    #[test]
    fn test_shutdown_timeout() {
        assert_eq!(HeraldConfig::default().shutdown_timeout(), Duration::from_secs(30));
    }
}
