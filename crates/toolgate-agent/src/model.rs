//! Model service abstraction.

use crate::conversation::{ContentBlock, Message};
use crate::error::AgentResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use toolgate_core::ToolDescriptor;

/// A completion request, serialized in the Messages API shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,
}

/// A model completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub id: Option<String>,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl Completion {
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self {
            id: None,
            content,
            stop_reason: None,
        }
    }

    /// Text blocks joined by newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_tool_use(&self) -> bool {
        self.content
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse { .. }))
    }
}

/// A service that produces completions.
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AgentResult<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_tools_and_system() {
        let request = CompletionRequest {
            model: "m".to_string(),
            max_tokens: 1024,
            system: None,
            messages: vec![Message::user_text("Hello")],
            tools: vec![],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("system").is_none());
        assert_eq!(value["max_tokens"], 1024);
    }

    #[test]
    fn test_completion_text_and_invocations() {
        let completion: Completion = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_1", "name": "get_current_weather",
                 "input": {"location": "Tokyo"}},
                {"type": "text", "text": "One moment."}
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap();

        assert_eq!(completion.text(), "Let me check.\nOne moment.");
        assert!(completion.has_tool_use());
        let invocation = completion.content[1].as_invocation().unwrap();
        assert_eq!(invocation.invocation_id, "toolu_1");
        assert_eq!(invocation.input["location"], "Tokyo");
    }
}
