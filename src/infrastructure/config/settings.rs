//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Every section is optional; an empty file yields the defaults. The bot token
//! is read from the environment, never from this file.
//!
//! # Example
//!
//! ```no_run
//! use pricealert::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::exchange::{ExchangeUrls, HttpConfig};
use super::logging::LoggingConfig;
use super::polling::PollingConfig;
use super::snapshot::SnapshotConfig;
use crate::domain::Exchange;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Evaluation interval and fetch fan-out.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Where active alerts are persisted.
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Timeouts for exchange requests.
    #[serde(default)]
    pub http: HttpConfig,

    /// Exchange base URL overrides.
    #[serde(default)]
    pub exchanges: ExchangeUrls,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) for a file that exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected pretty or json, got `{}`", self.logging.format),
            }
            .into());
        }
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.polling.max_concurrent_fetches == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_fetches",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.snapshot.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "path" }.into());
        }
        if self.http.timeout_ms == 0 || self.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }

        for exchange in Exchange::ALL {
            let raw = self.exchanges.base_url(exchange);
            let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                field: ExchangeUrls::field(exchange),
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: ExchangeUrls::field(exchange),
                    reason: format!("unsupported scheme `{}`", url.scheme()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.polling.interval_secs, 10);
        assert_eq!(config.polling.max_concurrent_fetches, 8);
        assert_eq!(config.snapshot.path, Path::new("active_alerts.json"));
        assert_eq!(
            config.exchanges.base_url(Exchange::Mexc),
            "https://contract.mexc.com"
        );
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [polling]
            interval_secs = 30

            [snapshot]
            path = "/var/lib/pricealert/alerts.json"

            [http]
            timeout_ms = 2500

            [exchanges]
            binance_url = "http://localhost:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.polling.poller().interval, Duration::from_secs(30));
        assert_eq!(config.polling.max_concurrent_fetches, 8);
        assert_eq!(config.http.timeout(), Duration::from_millis(2500));
        assert_eq!(config.http.connect_timeout_ms, 3000);
        assert_eq!(
            config.exchanges.base_url(Exchange::Binance),
            "http://localhost:8080"
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::parse_toml("[polling]\ninterval_secs = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "interval_secs",
                ..
            })
        ));
    }

    #[test]
    fn bad_exchange_url_is_rejected() {
        let err = Config::parse_toml("[exchanges]\nbybit_url = \"not a url\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "bybit_url",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(Config::parse_toml("[logging]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[polling").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
