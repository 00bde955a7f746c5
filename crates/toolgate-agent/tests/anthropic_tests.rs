//! Integration tests for the Anthropic model client

use serde_json::json;
use std::time::Duration;
use toolgate_agent::{
    AgentError, AnthropicModel, CompletionRequest, ContentBlock, Message, ModelService,
};
use toolgate_core::ToolDescriptor;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request_with_tools() -> CompletionRequest {
    CompletionRequest {
        model: "claude-3-opus-20240229".to_string(),
        max_tokens: 1024,
        system: Some("You are a helpful assistant.".to_string()),
        messages: vec![Message::user_text("What's the weather in Tokyo?")],
        tools: vec![ToolDescriptor::new(
            "get_current_weather",
            "Weather lookup",
            json!({"type": "object", "required": ["location"]}),
        )],
    }
}

#[tokio::test]
async fn test_complete_sends_messages_api_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-opus-20240229",
            "max_tokens": 1024,
            "system": "You are a helpful assistant.",
            "messages": [{
                "role": "user",
                "content": [{"type": "text", "text": "What's the weather in Tokyo?"}]
            }],
            "tools": [{"name": "get_current_weather"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-opus-20240229",
            "content": [
                {"type": "tool_use", "id": "toolu_01", "name": "get_current_weather",
                 "input": {"location": "Tokyo"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = AnthropicModel::new("sk-test", &server.uri(), Duration::from_secs(5)).unwrap();
    let completion = model.complete(request_with_tools()).await.unwrap();

    assert_eq!(completion.id.as_deref(), Some("msg_01"));
    assert_eq!(completion.stop_reason.as_deref(), Some("tool_use"));
    assert!(matches!(
        &completion.content[0],
        ContentBlock::ToolUse { id, .. } if id == "toolu_01"
    ));
}

#[tokio::test]
async fn test_api_error_maps_to_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let model = AnthropicModel::new("bad", &server.uri(), Duration::from_secs(5)).unwrap();
    let err = model.complete(request_with_tools()).await.unwrap_err();

    match err {
        AgentError::Model { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid x-api-key");
        }
        other => panic!("expected model error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_completion_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let model = AnthropicModel::new("sk-test", &server.uri(), Duration::from_secs(5)).unwrap();
    let err = model.complete(request_with_tools()).await.unwrap_err();

    assert!(matches!(err, AgentError::Protocol(_)));
}
