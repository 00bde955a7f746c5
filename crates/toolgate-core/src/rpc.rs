//! JSON-RPC 2.0 envelope types for the gateway wire protocol.
//!
//! Requests:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": "list-tools-1", "method": "tools/list", "params": {}}
//! {"jsonrpc": "2.0", "id": "toolu_01", "method": "tools/call",
//!  "params": {"name": "get_current_weather", "input": {"location": "Tokyo"}}}
//! ```
//!
//! Responses carry either `result` or `error`, never both. The numeric error
//! codes are part of the wire contract:
//!
//! | Code | Meaning |
//! |------|---------|
//! | -32600 | Invalid Request (bad version, missing id) |
//! | -32601 | Method not found / Tool not found |
//! | -32000 | Tool execution failed |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Protocol version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method listing the tool registry.
pub const METHOD_TOOLS_LIST: &str = "tools/list";

/// Method invoking a single tool.
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// Request identifier. Must be a non-empty string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

impl RequestId {
    /// Accept a raw JSON id if it is a non-empty string or an integer.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(RequestId::String(s.clone())),
            Value::Number(n) => n.as_i64().map(RequestId::Number),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RequestId::Number(n) => Value::from(*n),
            RequestId::String(s) => Value::String(s.clone()),
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

/// Error codes used by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRequest,
    MethodNotFound,
    ToolNotFound,
    ToolExecution,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound | ErrorCode::ToolNotFound => -32601,
            ErrorCode::ToolExecution => -32000,
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::ToolNotFound => "Tool not found",
            ErrorCode::ToolExecution => "Tool execution failed",
        }
    }
}

/// A gateway request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default = "empty_params")]
    pub params: Value,
}

/// Why a raw request envelope was rejected.
///
/// `id` holds whatever the caller supplied (possibly `null`) so the error
/// response can still echo it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid Request: {reason}")]
pub struct InvalidRequest {
    pub id: Value,
    pub reason: String,
}

impl InvalidRequest {
    fn new(id: Value, reason: impl Into<String>) -> Self {
        Self {
            id,
            reason: reason.into(),
        }
    }
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

impl RpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// Build a `tools/list` request.
    pub fn list_tools(id: impl Into<RequestId>) -> Self {
        Self::new(id, METHOD_TOOLS_LIST, empty_params())
    }

    /// Build a `tools/call` request.
    pub fn call_tool(id: impl Into<RequestId>, name: impl Into<String>, input: Value) -> Self {
        let params = serde_json::json!({
            "name": name.into(),
            "input": input,
        });
        Self::new(id, METHOD_TOOLS_CALL, params)
    }

    /// Validate a raw JSON body into a request.
    ///
    /// Rejects non-object bodies, a `jsonrpc` other than `"2.0"`, a missing or
    /// empty `id`, a non-string `method` and non-object `params`.
    pub fn from_value(value: Value) -> Result<Self, InvalidRequest> {
        let Value::Object(mut map) = value else {
            return Err(InvalidRequest::new(
                Value::Null,
                "request body must be a JSON object",
            ));
        };

        let raw_id = map.remove("id").unwrap_or(Value::Null);

        if map.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(InvalidRequest::new(raw_id, "jsonrpc must be \"2.0\""));
        }

        let Some(id) = RequestId::from_value(&raw_id) else {
            return Err(InvalidRequest::new(
                raw_id,
                "id must be a non-empty string or an integer",
            ));
        };

        let method = match map.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err(InvalidRequest::new(raw_id, "method must be a string")),
        };

        let params = match map.remove("params") {
            None | Some(Value::Null) => empty_params(),
            Some(params @ Value::Object(_)) => params,
            Some(_) => return Err(InvalidRequest::new(raw_id, "params must be an object")),
        };

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method,
            params,
        })
    }
}

/// Parameters of a `tools/call` request.
///
/// `input` also accepts the MCP spelling `arguments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "arguments")]
    pub input: Value,
}

/// Structured error carried by a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Error with the code's standard message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Either the result or the error of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(Value),
    Error(RpcError),
}

/// A gateway response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    /// Echo of the request id; `null` when the request carried none.
    #[serde(default)]
    pub id: Value,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: RpcOutcome::Result(result),
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: RpcOutcome::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            RpcOutcome::Result(value) => Some(value),
            RpcOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RpcError> {
        match &self.outcome {
            RpcOutcome::Error(error) => Some(error),
            RpcOutcome::Result(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.outcome {
            RpcOutcome::Result(value) => Ok(value),
            RpcOutcome::Error(error) => Err(error),
        }
    }
}
