//! Integration tests for the gateway JSON-RPC client

use serde_json::json;
use std::time::Duration;
use toolgate_agent::{AgentError, GatewayClient};
use toolgate_core::ToolInvocation;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GatewayClient {
    GatewayClient::new(
        format!("{}/mcp", server.uri()),
        Duration::from_secs(30),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_list_tools_parses_descriptors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "id": "list-tools-1",
            "method": "tools/list",
            "params": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "list-tools-1",
            "result": [{
                "name": "get_stock_data",
                "description": "Stock lookup",
                "input_schema": {"type": "object", "required": ["symbol"]}
            }]
        })))
        .mount(&server)
        .await;

    let tools = client(&server).list_tools().await.unwrap();

    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "get_stock_data");
    assert_eq!(tools[0].required_fields(), vec!["symbol"]);
}

#[tokio::test]
async fn test_list_tools_error_envelope_is_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32600, "message": "Invalid Request"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).list_tools().await.unwrap_err();
    assert!(matches!(err, AgentError::Gateway { .. }));
}

#[tokio::test]
async fn test_call_tool_returns_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "id": "toolu_9",
            "method": "tools/call",
            "params": {"name": "launch_rocket", "input": {}}
        })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": "toolu_9",
            "error": {"code": -32601, "message": "Tool not found"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invocation = ToolInvocation::new("toolu_9", "launch_rocket", json!({}));
    let response = client(&server).call_tool(&invocation).await.unwrap();

    assert!(response.is_error());
    assert_eq!(response.error().unwrap().code, -32601);
}

#[tokio::test]
async fn test_non_rpc_body_is_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let invocation = ToolInvocation::new("toolu_1", "get_current_weather", json!({}));
    let err = client(&server).call_tool(&invocation).await.unwrap_err();

    assert!(matches!(err, AgentError::Gateway { .. }));
}

#[tokio::test]
async fn test_call_timeout_is_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": "toolu_1", "result": {}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = GatewayClient::new(
        format!("{}/mcp", server.uri()),
        Duration::from_secs(30),
        Duration::from_millis(200),
    )
    .unwrap();
    let invocation = ToolInvocation::new("toolu_1", "get_current_weather", json!({}));

    let err = client.call_tool(&invocation).await.unwrap_err();
    assert!(matches!(err, AgentError::Gateway { .. }));
}
