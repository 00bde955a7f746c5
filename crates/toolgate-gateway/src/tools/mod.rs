//! Tool adapters backed by HTTP services.
//!
//! Each adapter validates its input, makes one call to its backend and
//! classifies any failure into a [`ToolFailure`]. Adapters never retry.

mod stock;
mod weather;

pub use stock::{STOCK_TOOL_NAME, StockTool};
pub use weather::{KEY_ERROR_MESSAGES, WEATHER_TOOL_NAME, WeatherTool};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use toolgate_core::{ToolFailure, ToolRegistry, ToolResult};

const USER_AGENT: &str = concat!("toolgate-gateway/", env!("CARGO_PKG_VERSION"));

/// Registry with every shipped tool, wired to the configured backends.
pub fn default_registry(config: &GatewayConfig) -> GatewayResult<ToolRegistry> {
    let timeout = config.tool_timeout();
    let registry = ToolRegistry::new()
        .with_tool(Arc::new(WeatherTool::new(&config.weather_url, timeout)?))?
        .with_tool(Arc::new(StockTool::new(&config.stock_url, timeout)?))?;
    Ok(registry)
}

pub(crate) fn build_client(timeout: Duration) -> GatewayResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| GatewayError::Client(e.to_string()))
}

/// Failure for a request that never produced a response.
pub(crate) fn transport_failure(err: reqwest::Error) -> ToolFailure {
    if err.is_timeout() {
        ToolFailure::unreachable(format!("backend timed out: {err}"))
    } else {
        ToolFailure::unreachable(err.to_string())
    }
}

/// Turn a backend response into the tool output or a classified failure.
///
/// Error bodies of the form `{"error": "..."}` contribute their message.
pub(crate) async fn read_backend_response(
    response: reqwest::Response,
    target: &str,
) -> ToolResult<Value> {
    let status = response.status();

    if status.is_success() {
        return response.json::<Value>().await.map_err(|e| {
            ToolFailure::upstream(status.as_u16(), format!("malformed backend response: {e}"))
        });
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    Err(ToolFailure::from_status(status.as_u16(), target, message))
}
