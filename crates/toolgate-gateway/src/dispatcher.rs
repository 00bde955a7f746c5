//! JSON-RPC dispatch over the tool registry.
//!
//! | Request | Status | Response |
//! |---------|--------|----------|
//! | bad envelope (version, id, non-object body or params) | 400 | `-32600` Invalid Request |
//! | `tools/list` | 200 | `result`: descriptors in registration order |
//! | `tools/call`, unknown or missing `name` | 404 | `-32601` Tool not found |
//! | `tools/call`, adapter succeeded | 200 | `result`: adapter output |
//! | `tools/call`, adapter failed | 500 | `-32000` `<tool> error: <failure>` |
//! | any other method | 404 | `-32601` Method not found |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use toolgate_core::{
    CallParams, ErrorCode, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST, RpcError, RpcRequest,
    RpcResponse, ToolRegistry,
};
use tracing::{debug, error, info, warn};

/// A response envelope together with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub status: StatusCode,
    pub response: RpcResponse,
}

impl GatewayReply {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            status: StatusCode::OK,
            response: RpcResponse::success(id, result),
        }
    }

    fn error(status: StatusCode, id: Value, error: RpcError) -> Self {
        Self {
            status,
            response: RpcResponse::failure(id, error),
        }
    }

    /// Reply for a body that is not a valid envelope.
    pub fn invalid_request(id: Value) -> Self {
        Self::error(
            StatusCode::BAD_REQUEST,
            id,
            RpcError::from_code(ErrorCode::InvalidRequest),
        )
    }
}

impl IntoResponse for GatewayReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Routes JSON-RPC requests to registered tools.
///
/// Cheap to clone; the registry is shared read-only.
#[derive(Debug, Clone)]
pub struct Gateway {
    registry: Arc<ToolRegistry>,
}

impl Gateway {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validate a raw body and dispatch it. Never fails; every problem
    /// becomes an error reply.
    pub async fn dispatch(&self, body: Value) -> GatewayReply {
        match RpcRequest::from_value(body) {
            Ok(request) => self.dispatch_request(request).await,
            Err(invalid) => {
                debug!(id = %invalid.id, reason = %invalid.reason, "Rejected request envelope");
                GatewayReply::invalid_request(invalid.id)
            }
        }
    }

    /// Dispatch an already validated request.
    pub async fn dispatch_request(&self, request: RpcRequest) -> GatewayReply {
        let id = request.id.to_value();

        match request.method.as_str() {
            METHOD_TOOLS_LIST => self.list_tools(id),
            METHOD_TOOLS_CALL => self.call_tool(id, request.params).await,
            other => {
                debug!(method = %other, "Unknown method");
                GatewayReply::error(
                    StatusCode::NOT_FOUND,
                    id,
                    RpcError::from_code(ErrorCode::MethodNotFound),
                )
            }
        }
    }

    fn list_tools(&self, id: Value) -> GatewayReply {
        match serde_json::to_value(self.registry.list()) {
            Ok(tools) => GatewayReply::ok(id, tools),
            Err(e) => {
                error!(error = %e, "Failed to serialize tool list");
                GatewayReply::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    id,
                    RpcError::new(ErrorCode::ToolExecution, "Failed to list tools"),
                )
            }
        }
    }

    async fn call_tool(&self, id: Value, params: Value) -> GatewayReply {
        // A derived struct deserializer also accepts sequences.
        if !params.is_object() {
            debug!("tools/call params is not an object");
            return GatewayReply::invalid_request(id);
        }
        let params: CallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                debug!(error = %e, "Malformed tools/call params");
                return GatewayReply::invalid_request(id);
            }
        };

        let Some(tool) = params
            .name
            .as_deref()
            .and_then(|name| self.registry.get(name))
        else {
            debug!(tool = ?params.name, "Tool not found");
            return GatewayReply::error(
                StatusCode::NOT_FOUND,
                id,
                RpcError::from_code(ErrorCode::ToolNotFound),
            );
        };

        let name = tool.descriptor.name.as_str();
        let input = match params.input {
            Value::Null => Value::Object(Map::new()),
            input => input,
        };

        info!(tool = %name, id = %id, "Dispatching tool call");

        match tool.adapter.invoke(input).await {
            Ok(output) => GatewayReply::ok(id, output),
            Err(failure) => {
                warn!(tool = %name, kind = %failure.kind(), error = %failure, "Tool call failed");
                let error = RpcError::new(ErrorCode::ToolExecution, format!("{name} error: {failure}"))
                    .with_data(json!({ "kind": failure.kind().as_str() }));
                GatewayReply::error(StatusCode::INTERNAL_SERVER_ERROR, id, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use toolgate_core::{ToolAdapter, ToolDescriptor, ToolFailure, ToolResult};

    struct EchoTool(ToolDescriptor);

    #[async_trait]
    impl ToolAdapter for EchoTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.0
        }

        async fn invoke(&self, input: Value) -> ToolResult<Value> {
            if input.get("fail").is_some() {
                return Err(ToolFailure::not_found("Seoul"));
            }
            Ok(json!({ "echo": input }))
        }
    }

    fn gateway() -> Gateway {
        let echo = EchoTool(ToolDescriptor::new(
            "echo",
            "Echo the input",
            json!({"type": "object"}),
        ));
        Gateway::new(ToolRegistry::new().with_tool(Arc::new(echo)).unwrap())
    }

    #[tokio::test]
    async fn test_list_echoes_id() {
        let reply = gateway()
            .dispatch(json!({"jsonrpc": "2.0", "id": 42, "method": "tools/list"}))
            .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.response.id, json!(42));
        assert_eq!(reply.response.result().unwrap()[0]["name"], "echo");
    }

    #[tokio::test]
    async fn test_call_defaults_missing_input_to_empty_object() {
        let reply = gateway()
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": "c1",
                "method": "tools/call",
                "params": {"name": "echo"}
            }))
            .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.response.result().unwrap(), &json!({"echo": {}}));
    }

    #[tokio::test]
    async fn test_adapter_failure_is_tool_execution_error() {
        let reply = gateway()
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": "c2",
                "method": "tools/call",
                "params": {"name": "echo", "input": {"fail": true}}
            }))
            .await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = reply.response.error().unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "echo error: no data for Seoul");
        assert_eq!(error.data, Some(json!({"kind": "not_found"})));
    }

    #[tokio::test]
    async fn test_missing_tool_name_is_tool_not_found() {
        let reply = gateway()
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": "c3",
                "method": "tools/call",
                "params": {}
            }))
            .await;

        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.response.error().unwrap().message, "Tool not found");
    }

    #[tokio::test]
    async fn test_non_object_params_is_invalid_request() {
        let reply = gateway()
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": "c4",
                "method": "tools/call",
                "params": ["echo"]
            }))
            .await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.response.error().unwrap().code, -32600);
        assert_eq!(reply.response.id, json!("c4"));
    }

    #[tokio::test]
    async fn test_array_params_never_reach_the_tool() {
        let request = RpcRequest::new("c5", METHOD_TOOLS_CALL, json!(["echo", {"fail": true}]));
        let reply = gateway().dispatch_request(request).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.response.error().unwrap().code, -32600);
        assert!(reply.response.result().is_none());
    }
}
