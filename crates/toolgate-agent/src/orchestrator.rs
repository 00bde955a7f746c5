//! The tool-use orchestration loop.
//!
//! One turn moves through at most two completions:
//!
//! ```text
//! Initial ──(no tool_use)──────────────────────────────▶ Done
//!    │
//!    └─(tool_use)─▶ AwaitingTool ──(tools/call, resubmit)─▶ Done
//! ```
//!
//! The first completion carries the gateway's tool list and the system
//! prompt. If it asks for a tool, the first `tool_use` block is executed
//! through the gateway and its outcome is sent back as a single `tool_result`;
//! the follow-up completion carries neither tools nor system prompt, so the
//! turn always ends there.

use crate::config::AgentConfig;
use crate::conversation::{ContentBlock, Conversation, Message};
use crate::error::{AgentError, AgentResult};
use crate::gateway_client::GatewayClient;
use crate::model::{Completion, CompletionRequest, ModelService};
use std::sync::Arc;
use toolgate_core::{RpcOutcome, RpcResponse, ToolDescriptor, ToolInvocation};
use tracing::{debug, info, warn};

/// Per-request settings for the model service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub system_prompt: Option<String>,
}

impl From<&AgentConfig> for CompletionSettings {
    fn from(config: &AgentConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system_prompt: Some(config.system_prompt.clone()).filter(|p| !p.is_empty()),
        }
    }
}

/// A tool call made during a turn, with the gateway's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolExchange {
    pub invocation: ToolInvocation,
    pub response: RpcResponse,
}

/// Result of one orchestration turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Text of the final completion.
    pub text: String,
    pub tool_exchange: Option<ToolExchange>,
    pub conversation: Conversation,
}

enum TurnPhase {
    Initial,
    AwaitingTool(Completion),
    Done(Completion),
}

pub struct Orchestrator {
    gateway: GatewayClient,
    model: Arc<dyn ModelService>,
    settings: CompletionSettings,
}

impl Orchestrator {
    pub fn new(
        gateway: GatewayClient,
        model: Arc<dyn ModelService>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            gateway,
            model,
            settings,
        }
    }

    /// Wire a gateway client and an Anthropic model from configuration.
    pub fn from_config(config: &AgentConfig) -> AgentResult<Self> {
        let gateway = GatewayClient::new(
            config.gateway_url.clone(),
            config.list_timeout(),
            config.call_timeout(),
        )?;
        let model = crate::anthropic::AnthropicModel::new(
            config.api_key.clone(),
            &config.base_url,
            config.model_timeout(),
        )?;
        Ok(Self::new(gateway, Arc::new(model), config.into()))
    }

    /// Run one query to a final answer.
    ///
    /// # Errors
    ///
    /// Gateway transport failures and model failures abort the turn. A tool
    /// that fails inside the gateway does not; its error is shown to the model.
    pub async fn run_turn(&self, query: &str) -> AgentResult<TurnOutcome> {
        let mut conversation = Conversation::new();
        conversation.push(Message::user_text(query));

        let mut tool_exchange = None;
        let mut phase = TurnPhase::Initial;

        loop {
            phase = match phase {
                TurnPhase::Initial => {
                    let tools = self.gateway.list_tools().await?;
                    debug!(tools = tools.len(), "Requesting initial completion");

                    let completion = self
                        .model
                        .complete(self.initial_request(&conversation, tools))
                        .await?;

                    if completion.has_tool_use() {
                        TurnPhase::AwaitingTool(completion)
                    } else {
                        TurnPhase::Done(completion)
                    }
                }
                TurnPhase::AwaitingTool(completion) => {
                    let (invocation, assistant_content) = select_invocation(&completion)?;

                    info!(
                        tool = %invocation.tool_name,
                        invocation_id = %invocation.invocation_id,
                        "Model requested tool"
                    );
                    let response = self.gateway.call_tool(&invocation).await?;
                    let result_block = tool_result_block(&invocation, &response)?;

                    conversation.push(Message::assistant(assistant_content));
                    conversation.push(Message::user(vec![result_block]));

                    let followup = self
                        .model
                        .complete(self.followup_request(&conversation))
                        .await?;

                    tool_exchange = Some(ToolExchange {
                        invocation,
                        response,
                    });
                    TurnPhase::Done(followup)
                }
                TurnPhase::Done(completion) => {
                    let text = completion.text();
                    conversation.push(Message::assistant(completion.content));
                    return Ok(TurnOutcome {
                        text,
                        tool_exchange,
                        conversation,
                    });
                }
            };
        }
    }

    fn initial_request(
        &self,
        conversation: &Conversation,
        tools: Vec<ToolDescriptor>,
    ) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            system: self.settings.system_prompt.clone(),
            messages: conversation.messages().to_vec(),
            tools,
        }
    }

    fn followup_request(&self, conversation: &Conversation) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            system: None,
            messages: conversation.messages().to_vec(),
            tools: Vec::new(),
        }
    }
}

/// Pick the first `tool_use` block and build the assistant content to echo
/// back: every other `tool_use` is dropped so each remaining one has a result.
/// All other blocks, including ones this client does not interpret, are kept.
fn select_invocation(completion: &Completion) -> AgentResult<(ToolInvocation, Vec<ContentBlock>)> {
    let mut selected: Option<ToolInvocation> = None;
    let mut content = Vec::with_capacity(completion.content.len());

    for block in &completion.content {
        match block {
            ContentBlock::ToolUse { .. } if selected.is_none() => {
                selected = block.as_invocation();
                content.push(block.clone());
            }
            ContentBlock::ToolUse { id, name, .. } => {
                warn!(tool = %name, invocation_id = %id, "Ignoring additional tool_use block");
            }
            other => content.push(other.clone()),
        }
    }

    selected
        .map(|invocation| (invocation, content))
        .ok_or_else(|| AgentError::protocol("completion has no tool_use block"))
}

/// `tool_result` carrying the serialized gateway result or error object.
fn tool_result_block(
    invocation: &ToolInvocation,
    response: &RpcResponse,
) -> AgentResult<ContentBlock> {
    let (content, is_error) = match &response.outcome {
        RpcOutcome::Result(result) => (serde_json::to_string(result), false),
        RpcOutcome::Error(error) => {
            warn!(
                tool = %invocation.tool_name,
                code = error.code,
                error = %error.message,
                "Tool call returned an error"
            );
            (serde_json::to_string(error), true)
        }
    };
    let content =
        content.map_err(|e| AgentError::protocol(format!("Failed to encode tool result: {e}")))?;

    Ok(ContentBlock::tool_result(
        invocation.invocation_id.clone(),
        content,
        is_error,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolgate_core::{ErrorCode, RpcError};

    fn tool_use(id: &str, location: &str) -> ContentBlock {
        ContentBlock::ToolUse {
            id: id.to_string(),
            name: "get_current_weather".to_string(),
            input: json!({ "location": location }),
        }
    }

    #[test]
    fn test_select_first_of_multiple_tool_uses() {
        let completion = Completion::new(vec![
            ContentBlock::text("Checking both."),
            tool_use("toolu_a", "Tokyo"),
            tool_use("toolu_b", "Osaka"),
            ContentBlock::Other(json!({"type": "thinking", "thinking": "..."})),
        ]);

        let (invocation, content) = select_invocation(&completion).unwrap();

        assert_eq!(invocation.invocation_id, "toolu_a");
        assert_eq!(
            content,
            vec![
                ContentBlock::text("Checking both."),
                tool_use("toolu_a", "Tokyo"),
                ContentBlock::Other(json!({"type": "thinking", "thinking": "..."})),
            ]
        );
    }

    #[test]
    fn test_tool_result_for_success_and_error() {
        let invocation = ToolInvocation::new("toolu_a", "get_current_weather", json!({}));

        let ok = RpcResponse::success(json!("toolu_a"), json!({"location": "Tokyo"}));
        assert_eq!(
            tool_result_block(&invocation, &ok).unwrap(),
            ContentBlock::tool_result("toolu_a", r#"{"location":"Tokyo"}"#.to_string(), false)
        );

        let failed = RpcResponse::failure(
            json!("toolu_a"),
            RpcError::new(ErrorCode::ToolExecution, "get_current_weather error: no data for Tokyo"),
        );
        match tool_result_block(&invocation, &failed).unwrap() {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                assert_eq!(tool_use_id, "toolu_a");
                assert!(is_error);
                let payload: serde_json::Value = serde_json::from_str(&content).unwrap();
                assert_eq!(payload["code"], -32000);
            }
            other => panic!("expected tool_result, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_from_config() {
        let settings = CompletionSettings::from(&AgentConfig::new("k"));
        assert_eq!(settings.model, "claude-3-opus-20240229");
        assert_eq!(settings.max_tokens, 1024);
        assert_eq!(
            settings.system_prompt.as_deref(),
            Some("You are a helpful assistant.")
        );
    }
}
