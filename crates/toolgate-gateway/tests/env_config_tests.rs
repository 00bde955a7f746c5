//! Integration tests for environment-based gateway configuration

use serial_test::serial;
use std::env;
use toolgate_gateway::{ConfigError, GatewayConfig};

fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

fn clear_env(key: &str) {
    unsafe {
        env::remove_var(key);
    }
}

fn clear_gateway_env_vars() {
    for key in [
        "MCP_HOST",
        "MCP_PORT",
        "WEATHER_API_URL",
        "STOCK_API_URL",
        "TOOLGATE_TOOL_TIMEOUT_SECS",
    ] {
        clear_env(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_no_vars_set() {
    clear_gateway_env_vars();

    let config = GatewayConfig::from_env().expect("defaults should load");

    assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    assert_eq!(config.weather_url, "http://localhost:5001/get_weather");
    assert_eq!(config.stock_url, "http://localhost:5002/stock");
    assert_eq!(config.tool_timeout_secs, 5);
}

#[test]
#[serial]
fn test_overrides() {
    clear_gateway_env_vars();
    set_env("MCP_HOST", "127.0.0.1");
    set_env("MCP_PORT", "9000");
    set_env("WEATHER_API_URL", "http://weather:5001/get_weather");
    set_env("STOCK_API_URL", "http://stock:5002/stock");
    set_env("TOOLGATE_TOOL_TIMEOUT_SECS", "2");

    let config = GatewayConfig::from_env().expect("should load config");

    assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    assert_eq!(config.weather_url, "http://weather:5001/get_weather");
    assert_eq!(config.stock_url, "http://stock:5002/stock");
    assert_eq!(config.tool_timeout_secs, 2);

    clear_gateway_env_vars();
}

#[test]
#[serial]
fn test_invalid_port() {
    clear_gateway_env_vars();
    set_env("MCP_PORT", "99999");

    let err = GatewayConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref key, .. } if key == "MCP_PORT"));

    clear_gateway_env_vars();
}

#[test]
#[serial]
fn test_invalid_weather_url() {
    clear_gateway_env_vars();
    set_env("WEATHER_API_URL", "weather service");

    let err = GatewayConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    clear_gateway_env_vars();
}
