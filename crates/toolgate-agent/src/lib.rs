//! # toolgate Agent
//!
//! Client side of toolgate: asks a model for a completion while offering the
//! gateway's tools, executes at most one requested tool through the gateway
//! and resubmits the result for a final answer.
//!
//! ## Example
//!
//! ```rust,ignore
//! use toolgate_agent::{AgentConfig, Orchestrator};
//!
//! let config = AgentConfig::from_env()?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let outcome = orchestrator.run_turn("What's the weather in Tokyo?").await?;
//! println!("Assistant: {}", outcome.text);
//! ```

pub mod anthropic;
pub mod config;
pub mod conversation;
pub mod error;
pub mod gateway_client;
pub mod model;
pub mod orchestrator;

pub use anthropic::AnthropicModel;
pub use config::{AgentConfig, ConfigError};
pub use conversation::{ContentBlock, Conversation, Message, Role};
pub use error::{AgentError, AgentResult};
pub use gateway_client::GatewayClient;
pub use model::{Completion, CompletionRequest, ModelService};
pub use orchestrator::{CompletionSettings, Orchestrator, ToolExchange, TurnOutcome};
