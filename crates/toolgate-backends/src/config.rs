//! # Environment-Based Configuration
//!
//! ## Weather service
//! - `WEATHER_API_KEY` - Upstream API key (optional; requests fail with 500 when unset)
//! - `WEATHER_API_ENDPOINT` - Upstream endpoint (default: `https://api.openweathermap.org/data/2.5/weather`)
//! - `WEATHER_PORT` - Listen port (default: 5001)
//! - `WEATHER_UNITS` - Unit system passed upstream (default: `metric`)
//! - `WEATHER_LANG` - Description language passed upstream (default: `kr`)
//! - `WEATHER_UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 10)
//!
//! ## Stock service
//! - `STOCK_PORT` - Listen port (default: 5002)

use std::time::Duration;
pub use toolgate_core::ConfigError;
use toolgate_core::config::{get_env_parsed, get_env_string, get_env_url, validate_url};

pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_PORT: u16 = 5001;
pub const DEFAULT_STOCK_PORT: u16 = 5002;

/// Weather service settings.
#[derive(Debug, Clone)]
pub struct WeatherServiceConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub port: u16,
    pub units: String,
    pub lang: String,
    pub upstream_timeout_secs: u64,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            port: DEFAULT_WEATHER_PORT,
            units: "metric".to_string(),
            lang: "kr".to_string(),
            upstream_timeout_secs: 10,
        }
    }
}

impl WeatherServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the result fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            // An empty key counts as unset.
            api_key: get_env_string("WEATHER_API_KEY").filter(|key| !key.trim().is_empty()),
            ..Self::default()
        };

        if let Some(endpoint) = get_env_url("WEATHER_API_ENDPOINT")? {
            config.endpoint = endpoint;
        }
        if let Some(port) = get_env_parsed::<u16>("WEATHER_PORT")? {
            config.port = port;
        }
        if let Some(units) = get_env_string("WEATHER_UNITS") {
            config.units = units;
        }
        if let Some(lang) = get_env_string("WEATHER_LANG") {
            config.lang = lang;
        }
        if let Some(timeout) = get_env_parsed::<u64>("WEATHER_UPSTREAM_TIMEOUT_SECS")? {
            config.upstream_timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("WEATHER_API_ENDPOINT", &self.endpoint)?;
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "upstream timeout must be greater than 0".to_string(),
            ));
        }
        if self.units.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "units must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stock service settings.
#[derive(Debug, Clone)]
pub struct StockServiceConfig {
    pub port: u16,
}

impl Default for StockServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_STOCK_PORT,
        }
    }
}

impl StockServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(port) = get_env_parsed::<u16>("STOCK_PORT")? {
            config.port = port;
        }
        Ok(config)
    }
}
