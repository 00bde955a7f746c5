//! Environment lookups shared by every toolgate configuration.
//!
//! Each service crate keeps its own config struct and `from_env`; the error
//! type and the variable parsing live here.

use std::{env, fmt::Display, str::FromStr};
use url::Url;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not set")]
    MissingEnvVar { key: String },

    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Raw value of `key`, if set.
pub fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Value of `key`, which must be set to something other than whitespace.
pub fn require_env_string(key: &str) -> Result<String, ConfigError> {
    get_env_string(key)
        .filter(|val| !val.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar {
            key: key.to_string(),
        })
}

/// Parse `key` as `T` when it is set.
pub fn get_env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid {} value '{val}': {e}", std::any::type_name::<T>()),
            }),
        Err(_) => Ok(None),
    }
}

/// Value of `key` when it is set and parses as an absolute URL.
pub fn get_env_url(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(val) => match Url::parse(&val) {
            Ok(_) => Ok(Some(val)),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid URL '{val}': {e}"),
            }),
        },
        Err(_) => Ok(None),
    }
}

/// Fail with a `ValidationError` naming `name` unless `value` is a URL.
pub fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map(|_| ()).map_err(|e| {
        ConfigError::ValidationError(format!("{name} '{value}' is not a valid URL: {e}"))
    })
}
