use super::{build_client, read_backend_response, transport_failure};
use crate::config::ConfigError;
use crate::error::GatewayResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use toolgate_core::{ToolAdapter, ToolDescriptor, ToolFailure, ToolResult, parse_input};
use tracing::debug;
use url::Url;

pub const STOCK_TOOL_NAME: &str = "get_stock_data";

#[derive(Debug, Deserialize)]
struct StockInput {
    symbol: String,
}

/// `get_stock_data`: GETs `{base}/{symbol}` from the stock service.
pub struct StockTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    base: Url,
}

impl StockTool {
    pub fn new(base_url: &str, timeout: Duration) -> GatewayResult<Self> {
        let base = Url::parse(base_url).map_err(|e| ConfigError::InvalidEnvVar {
            key: "STOCK_API_URL".to_string(),
            message: format!("invalid URL '{base_url}': {e}"),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::ValidationError(format!(
                "STOCK_API_URL '{base_url}' cannot be used as a base URL"
            ))
            .into());
        }

        Ok(Self {
            descriptor: descriptor(),
            client: build_client(timeout)?,
            base,
        })
    }

    /// URL for one symbol; the symbol is percent-encoded as a single path segment.
    fn quote_url(&self, symbol: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(symbol);
        }
        url
    }
}

fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        STOCK_TOOL_NAME,
        "Get the current stock data for a specific symbol.",
        json!({
            "type": "object",
            "properties": {
                "symbol": {"type": "string", "description": "Stock symbol"}
            },
            "required": ["symbol"]
        }),
    )
}

#[async_trait]
impl ToolAdapter for StockTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, input: Value) -> ToolResult<Value> {
        let StockInput { symbol } = parse_input(input)?;
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ToolFailure::invalid_input("symbol must not be empty"));
        }

        let url = self.quote_url(symbol);
        debug!(symbol = %symbol, url = %url, "Calling stock service");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_failure)?;

        read_backend_response(response, symbol).await
    }
}
