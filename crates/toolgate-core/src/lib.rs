//! # toolgate Core
//!
//! Shared building blocks for the toolgate gateway and its clients:
//!
//! - [`ToolDescriptor`]: the name, description and input schema advertised to a model
//! - [`ToolAdapter`]: the async trait implemented by every tool backend
//! - [`ToolRegistry`]: name-keyed catalogue of `{descriptor, adapter}` pairs
//! - [`rpc`]: the JSON-RPC 2.0 envelope spoken on the gateway wire
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use serde_json::{Value, json};
//! use std::sync::Arc;
//! use toolgate_core::{ToolAdapter, ToolDescriptor, ToolFailure, ToolRegistry};
//!
//! struct Echo(ToolDescriptor);
//!
//! #[async_trait]
//! impl ToolAdapter for Echo {
//!     fn descriptor(&self) -> &ToolDescriptor {
//!         &self.0
//!     }
//!
//!     async fn invoke(&self, input: Value) -> Result<Value, ToolFailure> {
//!         Ok(input)
//!     }
//! }
//!
//! let echo = Echo(ToolDescriptor::new("echo", "Echo the input", json!({"type": "object"})));
//! let registry = ToolRegistry::new().with_tool(Arc::new(echo)).unwrap();
//! assert_eq!(registry.list()[0].name, "echo");
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod rpc;
pub mod shutdown;
pub mod tool;

pub use config::ConfigError;
pub use error::{FailureKind, RegistryError, ToolFailure, ToolResult};
pub use registry::{RegisteredTool, ToolRegistry};
pub use rpc::{
    CallParams, ErrorCode, InvalidRequest, JSONRPC_VERSION, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    RequestId, RpcError, RpcOutcome, RpcRequest, RpcResponse,
};
pub use shutdown::shutdown_signal;
pub use tool::{ToolAdapter, ToolDescriptor, ToolInvocation, parse_input};
