//! # Environment-Based Configuration
//!
//! - `MCP_HOST` - Listen host (default: `0.0.0.0`)
//! - `MCP_PORT` - Listen port (default: 8000)
//! - `WEATHER_API_URL` - Weather service endpoint (default: `http://localhost:5001/get_weather`)
//! - `STOCK_API_URL` - Stock service base URL (default: `http://localhost:5002/stock`)
//! - `TOOLGATE_TOOL_TIMEOUT_SECS` - Timeout for each backend call (default: 5)

use std::time::Duration;
pub use toolgate_core::ConfigError;
use toolgate_core::config::{get_env_parsed, get_env_string, validate_url};

pub const DEFAULT_WEATHER_API_URL: &str = "http://localhost:5001/get_weather";
pub const DEFAULT_STOCK_API_URL: &str = "http://localhost:5002/stock";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub weather_url: String,
    pub stock_url: String,
    pub tool_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            weather_url: DEFAULT_WEATHER_API_URL.to_string(),
            stock_url: DEFAULT_STOCK_API_URL.to_string(),
            tool_timeout_secs: 5,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value
    /// or if the configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = get_env_string("MCP_HOST") {
            config.host = host;
        }
        if let Some(port) = get_env_parsed::<u16>("MCP_PORT")? {
            config.port = port;
        }
        if let Some(url) = get_env_string("WEATHER_API_URL") {
            config.weather_url = url;
        }
        if let Some(url) = get_env_string("STOCK_API_URL") {
            config.stock_url = url;
        }
        if let Some(timeout) = get_env_parsed::<u64>("TOOLGATE_TOOL_TIMEOUT_SECS")? {
            config.tool_timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("WEATHER_API_URL", &self.weather_url),
            ("STOCK_API_URL", &self.stock_url),
        ] {
            validate_url(name, value)?;
        }
        if self.tool_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "tool timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
