//! JSON-RPC client for the tool gateway.
//!
//! | Method | Request id | Timeout |
//! |--------|-----------|---------|
//! | `tools/list` | `list-tools-1` | list timeout (30 s default) |
//! | `tools/call` | the model's invocation id | call timeout (10 s default) |
//!
//! `call_tool` hands back the gateway's response envelope even when it carries
//! an error (and whatever the HTTP status), so the caller can relay the error
//! to the model. Only transport failures and unparseable bodies are errors.

use crate::error::{AgentError, AgentResult};
use reqwest::Client;
use std::time::Duration;
use toolgate_core::{RpcRequest, RpcResponse, ToolDescriptor, ToolInvocation};
use tracing::{debug, warn};

const LIST_REQUEST_ID: &str = "list-tools-1";

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    url: String,
    list_timeout: Duration,
    call_timeout: Duration,
}

impl GatewayClient {
    pub fn new(
        url: impl Into<String>,
        list_timeout: Duration,
        call_timeout: Duration,
    ) -> AgentResult<Self> {
        let http = Client::builder()
            .user_agent(format!("toolgate-agent/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AgentError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            list_timeout,
            call_timeout,
        })
    }

    /// Fetch the gateway's tool registry.
    pub async fn list_tools(&self) -> AgentResult<Vec<ToolDescriptor>> {
        let request = RpcRequest::list_tools(LIST_REQUEST_ID);
        let response = self.send(&request, self.list_timeout).await?;

        let result = response
            .into_result()
            .map_err(|e| AgentError::gateway(format!("tools/list failed: {e}")))?;

        let tools: Vec<ToolDescriptor> = serde_json::from_value(result)
            .map_err(|e| AgentError::protocol(format!("Malformed tool list: {e}")))?;

        debug!(count = tools.len(), "Fetched tool list");
        Ok(tools)
    }

    /// Invoke a tool, correlating the request id with the invocation id.
    pub async fn call_tool(&self, invocation: &ToolInvocation) -> AgentResult<RpcResponse> {
        let request = RpcRequest::call_tool(
            invocation.invocation_id.as_str(),
            invocation.tool_name.as_str(),
            invocation.input.clone(),
        );
        let response = self.send(&request, self.call_timeout).await?;

        if response.id != request.id.to_value() {
            warn!(
                expected = %request.id,
                received = %response.id,
                "Gateway response id does not match request id"
            );
        }
        Ok(response)
    }

    async fn send(&self, request: &RpcRequest, timeout: Duration) -> AgentResult<RpcResponse> {
        let response = self
            .http
            .post(&self.url)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AgentError::gateway(format!("{} request to {} failed: {e}", request.method, self.url))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::gateway(format!("Failed to read gateway response: {e}")))?;

        serde_json::from_str::<RpcResponse>(&body).map_err(|e| {
            AgentError::gateway(format!(
                "Gateway returned HTTP {status} without a JSON-RPC body: {e}"
            ))
        })
    }
}
