//! Client configuration, loadable from TOML.

use crate::types::Credentials;
use chrono::FixedOffset;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Vendor base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://api.instafogging.com";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API. Empty selects [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Vendor credentials.
    pub credentials: Credentials,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,
    /// Offset from UTC, in seconds, used to format log-file times.
    /// `None` uses the local time zone.
    pub utc_offset_secs: Option<i32>,
}

impl ClientConfig {
    /// Creates a configuration for the given host and credentials.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            ..Default::default()
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed or validated.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the base URL with the default applied and any trailing slash removed.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        if self.base_url.is_empty() {
            return DEFAULT_BASE_URL.to_string();
        }
        self.base_url
            .strip_suffix('/')
            .unwrap_or(&self.base_url)
            .to_string()
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns the configured log-file time offset.
    ///
    /// # Errors
    /// Returns error if the offset is outside ±24 hours.
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        self.utc_offset_secs
            .map(|secs| {
                FixedOffset::east_opt(secs).ok_or_else(|| {
                    ConfigError::InvalidValue(format!("utc_offset_secs {} is out of range", secs))
                })
            })
            .transpose()
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.cp.is_empty() {
            return Err(ConfigError::InvalidValue(
                "credentials.cp cannot be empty".to_string(),
            ));
        }
        if self.credentials.seckey.is_empty() {
            return Err(ConfigError::InvalidValue(
                "credentials.seckey cannot be empty".to_string(),
            ));
        }
        self.utc_offset()?;
        Ok(())
    }
}
