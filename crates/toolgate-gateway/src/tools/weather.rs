use super::{build_client, read_backend_response, transport_failure};
use crate::error::GatewayResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use toolgate_core::{ToolAdapter, ToolDescriptor, ToolFailure, ToolResult, parse_input};
use tracing::debug;

pub const WEATHER_TOOL_NAME: &str = "get_current_weather";

/// Error texts the weather service sends with a 500 when its upstream key is
/// rejected or missing.
pub const KEY_ERROR_MESSAGES: [&str; 2] = [
    "Invalid Weather API key",
    "Weather API key is not configured",
];

#[derive(Debug, Deserialize)]
struct WeatherInput {
    location: String,
}

/// `get_current_weather`: POSTs `{"location"}` to the weather service.
pub struct WeatherTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    url: String,
}

impl WeatherTool {
    pub fn new(url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        Ok(Self {
            descriptor: descriptor(),
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        WEATHER_TOOL_NAME,
        "Get the current weather information for a specific location. Please use English \
         city names (e.g., 'Seoul' instead of '서울', 'New York' instead of '뉴욕').",
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City name in English (e.g., Seoul, Tokyo, London)"
                }
            },
            "required": ["location"]
        }),
    )
}

#[async_trait]
impl ToolAdapter for WeatherTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, input: Value) -> ToolResult<Value> {
        let WeatherInput { location } = parse_input(input)?;
        if location.trim().is_empty() {
            return Err(ToolFailure::invalid_input("location must not be empty"));
        }

        debug!(location = %location, url = %self.url, "Calling weather service");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "location": location }))
            .send()
            .await
            .map_err(transport_failure)?;

        read_backend_response(response, &location)
            .await
            .map_err(|failure| match failure {
                ToolFailure::Upstream { status: 500, message }
                    if KEY_ERROR_MESSAGES.contains(&message.as_str()) =>
                {
                    ToolFailure::unauthorized(message)
                }
                other => other,
            })
    }
}
