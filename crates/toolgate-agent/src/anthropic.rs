//! Anthropic Messages API client.

use crate::error::{AgentError, AgentResult};
use crate::model::{Completion, CompletionRequest, ModelService};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

const MESSAGES_PATH: &str = "/v1/messages";

/// [`ModelService`] backed by the Anthropic Messages API.
pub struct AnthropicModel {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl AnthropicModel {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("toolgate-agent/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AgentError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), MESSAGES_PATH),
        })
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ModelService for AnthropicModel {
    async fn complete(&self, request: CompletionRequest) -> AgentResult<Completion> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Requesting completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ModelTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!(status = status.as_u16(), error = %message, "Model service returned an error");
            return Err(AgentError::model(status.as_u16(), message));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| AgentError::protocol(format!("Failed to parse completion: {e}")))?;

        debug!(
            stop_reason = ?completion.stop_reason,
            blocks = completion.content.len(),
            "Received completion"
        );
        Ok(completion)
    }
}

impl std::fmt::Debug for AnthropicModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicModel")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
