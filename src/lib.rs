//! # toolgate
//!
//! Lets a conversational model call external tools through a JSON-RPC 2.0
//! gateway, then feeds the tool results back so the model can answer.
//!
//! ## Components
//!
//! - **[tool_core]**: tool registry, adapter trait, failure taxonomy, JSON-RPC envelope
//! - **[gateway]**: `POST /mcp` dispatcher plus the weather and stock tool adapters
//! - **[backends]**: the weather service and the mock stock service
//! - **[agent]**: the orchestration loop, gateway client and model service client
//!
//! ## Flow
//!
//! ```text
//! query ─▶ Orchestrator ─▶ model (with tools/list)
//!                │
//!                └─ tool_use? ─▶ gateway tools/call ─▶ adapter ─▶ backend
//!                                        │
//!                      tool_result ◀─────┘ ─▶ model ─▶ answer
//! ```

pub use toolgate_agent as agent;
pub use toolgate_backends as backends;
pub use toolgate_core as tool_core;
pub use toolgate_gateway as gateway;

pub use toolgate_agent::{AgentConfig, Orchestrator, TurnOutcome};
pub use toolgate_core::{ToolAdapter, ToolDescriptor, ToolRegistry};
pub use toolgate_gateway::{Gateway, GatewayConfig, GatewayServer};
