//! Error types for the orchestration loop.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Failures that abort an orchestration turn.
///
/// Tool failures reported by the gateway are not errors here; they are fed
/// back to the model as `tool_result` blocks.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The gateway could not be reached or answered with something that is
    /// not a JSON-RPC response.
    #[error("Gateway error: {message}")]
    Gateway { message: String },

    /// The model service answered with an error status.
    #[error("Model service error ({status}): {message}")]
    Model { status: u16, message: String },

    /// The model service could not be reached.
    #[error("Model service unreachable: {0}")]
    ModelTransport(String),

    /// A response could not be interpreted.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl AgentError {
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }

    pub fn model(status: u16, message: impl Into<String>) -> Self {
        Self::Model {
            status,
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
